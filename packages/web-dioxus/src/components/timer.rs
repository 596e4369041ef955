//! Browser timers for component tasks

/// Resolve after `ms` milliseconds in the browser
///
/// During server rendering the future never resolves, so timer-driven tasks
/// only make progress once the page is hydrated.
pub async fn sleep_ms(ms: u32) {
    #[cfg(feature = "web")]
    gloo_timers::future::TimeoutFuture::new(ms).await;

    #[cfg(not(feature = "web"))]
    {
        let _ = ms;
        std::future::pending::<()>().await;
    }
}
