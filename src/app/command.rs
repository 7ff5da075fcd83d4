use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Debounce(String),
    SearchUsers(String),
    FetchUser(String),
    ScheduleBlurClose { token: u64, delay: Duration },
    CancelBlurClose(u64),
    Batch(Vec<Command>),
}

impl Command {
    /// Collapses a list of commands into at most one.
    #[must_use]
    pub fn batch(mut commands: Vec<Command>) -> Option<Command> {
        match commands.len() {
            0 => None,
            1 => commands.pop(),
            _ => Some(Command::Batch(commands)),
        }
    }
}
