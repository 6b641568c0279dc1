//! Unit tests for waiting on the completion marker.

#![allow(clippy::expect_used)]

use std::time::Duration;

use aks_node_controller::application::services::provision_wait::wait_for_completion;
use aks_node_controller::application::services::recorder::ProvisioningResultRecorder;
use aks_node_controller::domain::{FailureClass, ProvisionError};
use aks_node_controller::infra::LocalFs;
use aks_node_controller::infra::fs::write_durable;

use crate::helpers::{NodeRoot, outcome};

const POLL: Duration = Duration::from_millis(20);

#[tokio::test]
async fn returns_immediately_when_already_complete() {
    let node = NodeRoot::new();
    ProvisioningResultRecorder::new(&node.paths, &LocalFs)
        .record(&outcome(FailureClass::None, None))
        .await
        .expect("record");

    let completed = wait_for_completion(&node.paths, &LocalFs, POLL, Duration::from_secs(2))
        .await
        .expect("wait");
    assert_eq!(completed.result.exit_code, 0);
    assert!(completed.raw.contains("\"ExitCode\": \"0\""));
}

#[tokio::test]
async fn waits_for_marker_written_later() {
    let node = NodeRoot::new();
    let record = async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        ProvisioningResultRecorder::new(&node.paths, &LocalFs)
            .record(&outcome(FailureClass::OutboundConnectivity, Some("no egress")))
            .await
            .expect("record");
    };

    let ((), waited) = tokio::join!(
        record,
        wait_for_completion(&node.paths, &LocalFs, POLL, Duration::from_secs(5))
    );
    let completed = waited.expect("wait");
    assert_eq!(completed.result.exit_code, 50);
    assert_eq!(completed.result.error, "no egress");
}

#[tokio::test]
async fn result_without_marker_is_not_reported() {
    let node = NodeRoot::new();
    write_durable(node.paths.provision_json(), br#"{"ExitCode":"0"}"#).expect("write");

    let err = wait_for_completion(&node.paths, &LocalFs, POLL, Duration::from_millis(200))
        .await
        .expect_err("must time out");
    assert!(matches!(
        err.downcast_ref::<ProvisionError>(),
        Some(ProvisionError::WaitTimedOut { .. })
    ));
}

#[tokio::test]
async fn unparsable_result_is_an_error() {
    let node = NodeRoot::new();
    write_durable(node.paths.provision_json(), b"not json").expect("write");
    write_durable(node.paths.provision_complete(), b"").expect("marker");

    let err = wait_for_completion(&node.paths, &LocalFs, POLL, Duration::from_secs(1))
        .await
        .expect_err("must fail");
    assert!(format!("{err:#}").contains("parsing"));
}
