//! Unit tests for the provisioning service: every way an attempt can end is
//! turned into a classified outcome.

#![allow(clippy::expect_used)]

use std::path::Path;

use aks_node_controller::application::ports::ScriptExit;
use aks_node_controller::application::services::provision::run_attempt;
use aks_node_controller::application::services::recorder::ProvisioningResultRecorder;
use aks_node_controller::domain::{
    DEFAULT_OUTBOUND_MESSAGE, DEFAULT_TIMEOUT_SECS, FailureClass, ProvisionResult,
};
use aks_node_controller::infra::LocalFs;

use crate::helpers::{FakeConfig, FakeRunner, NeverRun, NodeRoot, SpawnFailure, config};

const CONFIG: &str = "/etc/aks/provision-config.json";

#[tokio::test]
async fn zero_exit_is_success() {
    let node = NodeRoot::new();
    let runner = FakeRunner {
        exit: ScriptExit::Exited(Some(0)),
        output: "kubelet started\n",
    };
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &runner,
        &LocalFs,
    )
    .await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.script_exit_code, Some(0));
    assert_eq!(outcome.error_detail, None);
    assert_eq!(outcome.output, "kubelet started\n");
    assert!(outcome.finished_at >= outcome.started_at);
}

#[tokio::test]
async fn exit_50_is_outbound_connectivity_with_output_detail() {
    let node = NodeRoot::new();
    let runner = FakeRunner {
        exit: ScriptExit::Exited(Some(50)),
        output: "checking egress\ncurl: (28) Connection timed out after 10001 ms\n",
    };
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &runner,
        &LocalFs,
    )
    .await;

    assert_eq!(outcome.failure_class, FailureClass::OutboundConnectivity);
    assert_eq!(outcome.exit_code(), 50);
    let detail = outcome.error_detail.expect("detail");
    assert!(detail.ends_with("Connection timed out after 10001 ms"));
}

#[tokio::test]
async fn other_non_zero_exit_is_generic_failure() {
    let node = NodeRoot::new();
    let runner = FakeRunner {
        exit: ScriptExit::Exited(Some(124)),
        output: "",
    };
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &runner,
        &LocalFs,
    )
    .await;

    assert_eq!(outcome.failure_class, FailureClass::Other);
    assert_eq!(outcome.script_exit_code, Some(124));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.error_detail.as_deref(),
        Some("provisioning script exited with code 124")
    );
}

#[tokio::test]
async fn timeout_is_generic_failure() {
    let node = NodeRoot::new();
    let runner = FakeRunner {
        exit: ScriptExit::TimedOut,
        output: "still waiting\n",
    };
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &runner,
        &LocalFs,
    )
    .await;

    assert_eq!(outcome.failure_class, FailureClass::Other);
    assert_eq!(outcome.script_exit_code, None);
    assert_eq!(
        outcome.error_detail,
        Some(format!(
            "provisioning script timed out after {DEFAULT_TIMEOUT_SECS}s"
        ))
    );
}

#[tokio::test]
async fn signal_termination_is_generic_failure() {
    let node = NodeRoot::new();
    let runner = FakeRunner {
        exit: ScriptExit::Exited(None),
        output: "",
    };
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &runner,
        &LocalFs,
    )
    .await;
    assert_eq!(outcome.failure_class, FailureClass::Other);
}

#[tokio::test]
async fn spawn_failure_is_generic_failure() {
    let node = NodeRoot::new();
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &SpawnFailure,
        &LocalFs,
    )
    .await;

    assert_eq!(outcome.failure_class, FailureClass::Other);
    assert!(
        outcome
            .error_detail
            .as_deref()
            .is_some_and(|d| d.contains("failed to spawn"))
    );
}

#[tokio::test]
async fn bad_config_never_runs_script() {
    let node = NodeRoot::new();
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Invalid("Unsupported provision config version 'v0'"),
        &NeverRun,
        &LocalFs,
    )
    .await;

    assert_eq!(outcome.failure_class, FailureClass::Other);
    assert_eq!(outcome.script_exit_code, None);
    assert!(
        outcome
            .error_detail
            .as_deref()
            .is_some_and(|d| d.contains("v0"))
    );
    assert!(!node.paths.cluster_provision_log().exists());
}

#[tokio::test]
async fn earlier_attempt_output_is_not_attributed_to_this_attempt() {
    let node = NodeRoot::new();
    let first = FakeRunner {
        exit: ScriptExit::Exited(Some(1)),
        output: "OLD BOOT: apt-get failed\n",
    };
    let earlier = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &first,
        &LocalFs,
    )
    .await;
    assert_eq!(earlier.output, "OLD BOOT: apt-get failed\n");

    let second = FakeRunner {
        exit: ScriptExit::Exited(Some(50)),
        output: "",
    };
    let outcome = run_attempt(
        &node.paths,
        Path::new(CONFIG),
        &FakeConfig::Valid(config()),
        &second,
        &LocalFs,
    )
    .await;
    assert_eq!(outcome.failure_class, FailureClass::OutboundConnectivity);
    assert_eq!(outcome.output, "");

    ProvisioningResultRecorder::new(&node.paths, &LocalFs)
        .record(&outcome)
        .await
        .expect("record");

    let message = node.read(node.paths.outbound_error_message());
    assert!(!message.contains("OLD BOOT"));
    assert_eq!(message, DEFAULT_OUTBOUND_MESSAGE);
    let doc: ProvisionResult =
        serde_json::from_str(&node.read(node.paths.provision_json())).expect("parse");
    assert!(!doc.output.contains("OLD BOOT"));
    assert!(
        node.read(node.paths.cluster_provision_log())
            .contains("OLD BOOT"),
        "the log itself keeps earlier attempts",
    );
}
