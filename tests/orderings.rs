use serde::{Deserialize, Serialize};
use typed_atomics::{FenceOrdering, LoadOrdering, MemoryOrdering, OrderingError, StoreOrdering, UpdateOrdering};

/// A configuration record choosing orderings per operation, as a lock-free
/// structure might load them from a tuning file.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueueOrderings {
    head_load: LoadOrdering,
    tail_store: StoreOrdering,
    claim: UpdateOrdering,
    #[serde(default)]
    publish_fence: FenceOrdering,
}

#[test]
fn names_parse_back() -> anyhow::Result<()> {
    for o in MemoryOrdering::ALL {
        assert_eq!(o.to_string().parse::<MemoryOrdering>()?, o);
    }
    let fence: FenceOrdering = "acquireRelease".parse()?;
    assert_eq!(fence, FenceOrdering::AcquireRelease);
    Ok(())
}

#[test]
fn parse_errors_name_the_problem() {
    let err = "consume".parse::<MemoryOrdering>().unwrap_err();
    assert_eq!(err, OrderingError::Unknown("consume".into()));
    assert_eq!(err.to_string(), "unknown memory ordering `consume`");

    let err = "acquire".parse::<StoreOrdering>().unwrap_err();
    assert_eq!(err.to_string(), "`acquire` is not a legal store ordering");
}

#[test]
fn ordering_errors_convert_into_anyhow() {
    fn configured() -> anyhow::Result<LoadOrdering> {
        Ok("release".parse()?)
    }
    let err = configured().unwrap_err();
    assert!(err.downcast_ref::<OrderingError>().is_some());
}

#[test]
fn serde_uses_camel_case_names() -> anyhow::Result<()> {
    assert_eq!(
        serde_json::to_string(&MemoryOrdering::SequentiallyConsistent)?,
        "\"sequentiallyConsistent\""
    );

    let cfg = QueueOrderings {
        head_load: LoadOrdering::Acquire,
        tail_store: StoreOrdering::Release,
        claim: UpdateOrdering::AcquireRelease,
        publish_fence: FenceOrdering::Release,
    };
    let json = serde_json::to_string(&cfg)?;
    assert_eq!(
        json,
        r#"{"headLoad":"acquire","tailStore":"release","claim":"acquireRelease","publishFence":"release"}"#
    );
    assert_eq!(serde_json::from_str::<QueueOrderings>(&json)?, cfg);
    Ok(())
}

#[test]
fn serde_defaults_to_sequential_consistency() -> anyhow::Result<()> {
    let cfg: QueueOrderings =
        serde_json::from_str(r#"{"headLoad":"relaxed","tailStore":"relaxed","claim":"relaxed"}"#)?;
    assert_eq!(cfg.publish_fence, FenceOrdering::SequentiallyConsistent);
    Ok(())
}

#[test]
fn serde_rejects_orderings_illegal_for_the_field() {
    let err = serde_json::from_str::<LoadOrdering>("\"release\"").unwrap_err();
    assert!(err.to_string().contains("not a legal load ordering"), "{err}");
    assert!(serde_json::from_str::<MemoryOrdering>("\"seqCst\"").is_err());
}
