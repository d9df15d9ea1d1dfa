//! gui/update/util.rs
use iced::futures::channel::oneshot;

/// Run a blocking function on a background thread and await the result.
///
/// Saves repeating the oneshot + thread boilerplate for every
/// “do work off-thread, then send Message::Finished(...)” case.
pub(crate) async fn spawn_blocking<T>(f: impl FnOnce() -> T + Send + 'static) -> Result<T, String>
where
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel::<T>();

    std::thread::spawn(move || {
        let _ = tx.send(f());
    });

    rx.await
        .map_err(|_| "background worker dropped without returning".to_string())
}

/// Collapse a worker result and the job's own result into one.
pub(crate) fn joined<T>(result: Result<Result<T, String>, String>) -> Result<T, String> {
    result.and_then(|inner| inner)
}
