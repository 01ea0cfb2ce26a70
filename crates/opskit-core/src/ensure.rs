//! The create-if-absent pattern shared by every provisioning command.
//!
//! Existence is always re-queried from the source of truth; nothing is
//! memoized between invocations. A failed create is surfaced to the caller
//! untouched — no retry, no rollback of dependents created earlier in the
//! same flow.

use serde::Serialize;
use std::future::Future;

/// Outcome of an idempotent create-if-absent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ensure {
    Created,
    AlreadyExists,
}

impl Ensure {
    pub fn created(self) -> bool {
        self == Ensure::Created
    }

    /// One-line report for the terminal, e.g. `created bucket 'assets'`
    /// or `bucket 'assets' already exists`.
    pub fn describe(self, what: &str) -> String {
        match self {
            Ensure::Created => format!("created {what}"),
            Ensure::AlreadyExists => format!("{what} already exists"),
        }
    }
}

/// Run the existence probe, then the create only if the resource is absent.
///
/// Generic over the error type so SDK-backed and subprocess-backed callers
/// can both use it with their own error handling.
pub async fn ensure_with<E, ExistsFn, ExistsFut, CreateFn, CreateFut>(
    exists: ExistsFn,
    create: CreateFn,
) -> Result<Ensure, E>
where
    ExistsFn: FnOnce() -> ExistsFut,
    ExistsFut: Future<Output = Result<bool, E>>,
    CreateFn: FnOnce() -> CreateFut,
    CreateFut: Future<Output = Result<(), E>>,
{
    if exists().await? {
        return Ok(Ensure::AlreadyExists);
    }
    create().await?;
    Ok(Ensure::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn creates_when_absent() {
        let created = Cell::new(false);
        let outcome: Result<Ensure, ()> = ensure_with(
            || async { Ok(false) },
            || async {
                created.set(true);
                Ok(())
            },
        )
        .await;
        assert_eq!(outcome, Ok(Ensure::Created));
        assert!(created.get());
    }

    #[tokio::test]
    async fn skips_create_when_present() {
        let created = Cell::new(false);
        let outcome: Result<Ensure, ()> = ensure_with(
            || async { Ok(true) },
            || async {
                created.set(true);
                Ok(())
            },
        )
        .await;
        assert_eq!(outcome, Ok(Ensure::AlreadyExists));
        assert!(!created.get(), "create must not run for an existing resource");
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        // Simulates two invocations against a world where the first create
        // took effect: the second never calls create and still succeeds.
        let world_exists = Cell::new(false);
        for expected in [Ensure::Created, Ensure::AlreadyExists] {
            let outcome: Result<Ensure, ()> = ensure_with(
                || async { Ok(world_exists.get()) },
                || async {
                    world_exists.set(true);
                    Ok(())
                },
            )
            .await;
            assert_eq!(outcome, Ok(expected));
        }
    }

    #[tokio::test]
    async fn create_failure_is_surfaced() {
        let outcome: Result<Ensure, &str> =
            ensure_with(|| async { Ok(false) }, || async { Err("CreateFailed") }).await;
        assert_eq!(outcome, Err("CreateFailed"));
    }

    #[test]
    fn describe_reads_naturally() {
        assert_eq!(Ensure::Created.describe("queue 'jobs'"), "created queue 'jobs'");
        assert_eq!(
            Ensure::AlreadyExists.describe("queue 'jobs'"),
            "queue 'jobs' already exists"
        );
    }
}
