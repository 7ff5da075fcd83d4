use crate::app::{action::Action, command::Command};
use crate::domain::search::SearchFacade;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the network commands. Results come back as actions on `tx`.
pub fn handle_command(
    command: Command,
    client: Arc<dyn SearchFacade>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::SearchUsers(query) => {
            tokio::spawn(async move {
                let action = match client.search_by_prefix(query.trim()).await {
                    Ok(users) => {
                        log::info!("{} users for {query:?}", users.len());
                        Action::UsersLoaded(query, users)
                    }
                    Err(e) => Action::SearchFailed(query, e),
                };
                let _ = tx.send(action).await;
            });
        }
        Command::FetchUser(login) => {
            tokio::spawn(async move {
                let action = match client.fetch_exact(&login).await {
                    Ok(user) => Action::UserLoaded(Box::new(user)),
                    Err(e) => Action::LookupFailed(login, e),
                };
                let _ = tx.send(action).await;
            });
        }
        other => {
            anyhow::bail!("{other:?} is not a network command");
        }
    }
    Ok(())
}
