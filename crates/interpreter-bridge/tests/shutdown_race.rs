//! Shutdown while other threads are mid-call. Kept in its own test binary
//! because shutdown is permanent for the process.

mod common;

use common::{calculations_bridge, fixtures_bridge};
use interpreter_bridge::{shutdown, state, BridgeError, InterpreterState};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const WORKERS: usize = 6;
const CALLS: usize = 2000;

#[test]
fn shutdown_during_concurrent_calls_is_clean() {
    let calculations = Arc::new(calculations_bridge());
    let fixtures = Arc::new(fixtures_bridge());

    // Both modules imported before the race starts.
    assert!(calculations.call_bool("bigGt", &["2", "1"]).unwrap());
    assert_eq!(fixtures.call_string("echo", &["a", "b"]).unwrap(), "a|b");
    assert!(matches!(state(), InterpreterState::Running { owned: true }));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let calculations = Arc::clone(&calculations);
            let fixtures = Arc::clone(&fixtures);
            thread::spawn(move || {
                let mut completed = 0;
                let mut refused = 0;
                for i in 0..CALLS {
                    let a = (worker * CALLS + i + 1).to_string();
                    let b = (worker * CALLS + i).to_string();

                    let results = [
                        calculations
                            .call_bool("bigGt", &[a.as_str(), b.as_str()])
                            .map(|gt| assert!(gt)),
                        fixtures
                            .call_string("echo", &[a.as_str(), b.as_str()])
                            .map(|echoed| assert_eq!(echoed, format!("{a}|{b}"))),
                    ];
                    for result in results {
                        match result {
                            Ok(()) => {
                                assert_eq!(refused, 0, "call succeeded after shutdown");
                                completed += 1;
                            }
                            Err(err) => {
                                assert_eq!(err, BridgeError::ShutDown);
                                refused += 1;
                            }
                        }
                    }
                }
                (completed, refused)
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(5));
    assert!(shutdown());
    assert_eq!(state(), InterpreterState::ShutDown);

    for handle in handles {
        let (completed, refused) = handle.join().unwrap();
        assert_eq!(completed + refused, CALLS * 2);
    }

    // Later calls keep being refused.
    assert_eq!(
        calculations.call_bool("bigGt", &["2", "1"]),
        Err(BridgeError::ShutDown)
    );
    assert_eq!(
        fixtures.call_string("echo", &["a", "b"]),
        Err(BridgeError::ShutDown)
    );
    assert!(!shutdown());
}
