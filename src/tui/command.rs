use futures::future::BoxFuture;
use std::future::Future;

/// Commands represent side effects that apps want to perform.
/// They are returned from the update() function and executed by the runtime.
pub enum Command<Msg> {
    /// Do nothing
    None,

    /// Execute multiple commands in sequence
    Batch(Vec<Command<Msg>>),

    /// Perform an async operation and send the result as a message
    Perform(BoxFuture<'static, Msg>),

    /// Quit the application
    Quit,
}

impl<Msg> Command<Msg> {
    /// Helper to create a command that performs an async operation
    pub fn perform<F, T>(future: F, to_msg: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Msg: Send + 'static,
    {
        Command::Perform(Box::pin(async move {
            let result = future.await;
            to_msg(result)
        }))
    }

    /// Helper to batch multiple commands
    pub fn batch(commands: Vec<Command<Msg>>) -> Self {
        Command::Batch(commands)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}

impl<Msg> Default for Command<Msg> {
    fn default() -> Self {
        Command::None
    }
}
