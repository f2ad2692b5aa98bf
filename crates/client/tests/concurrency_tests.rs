//! Shared-client concurrency tests.
//!
//! # Invariants
//! - One `Arc<SearchClient>` can serve many tasks at once
//! - Job handles from the same client are independent
//!
//! # What this does NOT handle
//! - Rate limiting or connection pool tuning

mod common;

use std::sync::Arc;

use common::*;
use futures::future::join_all;
use wiremock::matchers::{method, path_regex};

#[tokio::test]
async fn test_parallel_status_and_delete_share_client() {
    let mock_server = MockServer::start().await;
    let client = connect(&mock_server).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/services/search/jobs/job_\d+$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(load_fixture("search/job_status_done.json")),
        )
        .expect(8)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path_regex(r"^/services/search/jobs/job_\d+$"))
        .and(RawQuery("output_mode=json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(8)
        .mount(&mock_server)
        .await;

    let ctx = CancellationToken::new();
    let tasks = (0..8).map(|i| {
        let client = Arc::clone(&client);
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let job = client.job(format!("job_{}", i));
            let status = job.status(&ctx).await?;
            job.delete(&ctx).await?;
            Ok::<_, ClientError>(status.state())
        })
    });

    let results = join_all(tasks).await;
    for result in results {
        let state = result.expect("task panicked").expect("request failed");
        assert_eq!(state, JobState::Done);
    }
}

#[tokio::test]
async fn test_cancelling_shared_token_stops_all_tasks() {
    let mock_server = MockServer::start().await;
    let client = connect(&mock_server).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/services/search/jobs/job_\d+$"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let ctx = CancellationToken::new();
    let tasks: Vec<_> = (0..4)
        .map(|i| {
            let client = Arc::clone(&client);
            let ctx = ctx.clone();
            tokio::spawn(async move { client.job(format!("job_{}", i)).status(&ctx).await })
        })
        .collect();

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    ctx.cancel();

    for result in join_all(tasks).await {
        let err = result.expect("task panicked").unwrap_err();
        assert!(err.is_cancelled(), "expected cancellation, got {:?}", err);
    }
}
