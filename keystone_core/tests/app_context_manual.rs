mod common;

#[cfg(test)]
mod tests {
    use crate::common::context::TerminationWatch;
    use keystone_core::AppContext;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn manual() {
        // Given
        let mut watch = TerminationWatch::new();
        watch.watch().await;
        watch.watch().await;

        // Then
        assert!(AppContext::is_alive());
        assert_eq!(watch.raised(), 0);

        // When
        AppContext::terminate();
        AppContext::terminate();
        tokio::task::yield_now().await;

        // Then
        assert!(AppContext::is_terminated());
        assert_eq!(watch.raised(), watch.len());

        // Already terminated
        AppContext::terminated().await;
    }
}
