mod common;

use std::sync::atomic::Ordering;
use std::sync::mpsc::channel;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use common::{CountingCore, GatedCore};
use rust_spm_sdk::{InitState, SdkConfig, Sdk};

fn linked() -> Sdk {
    Sdk::with_config(SdkConfig::default()).unwrap()
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(5, 5)]
#[case(10, 55)]
#[case(-3, 0)]
#[case(100, i64::MAX)]
fn fibonacci_through_the_wrapper(#[case] n: i32, #[case] expected: i64) {
    assert_eq!(linked().fibonacci(n), expected);
}

#[test]
fn hello_rust_is_described() {
    let sdk = linked();
    let input = "Hello, Rust!";
    let outcome = sdk.process_string(input).unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.value, 12);
    let message = outcome.message.unwrap();
    assert!(message.contains("Processed: Hello, Rust!"));
    assert!(message.contains("length: 12"));
}

#[test]
fn empty_input_is_described() {
    let outcome = linked().process_string("").unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.value, 0);
    assert!(outcome.message.unwrap().contains("length: 0"));
}

#[test]
fn initialize_twice_reports_success() {
    let sdk = Sdk::new(CountingCore::default(), SdkConfig::default()).unwrap();
    assert!(sdk.initialize());
    assert!(sdk.initialize());
    assert_eq!(sdk.state(), InitState::Initialized);
}

#[test]
fn version_of_linked_core() {
    assert_eq!(linked().version(), "1.0.0");
}

#[tokio::test]
async fn fibonacci_async_resolves() {
    assert_eq!(linked().fibonacci_async(8).await, Ok(21));
}

#[tokio::test(flavor = "current_thread")]
async fn fibonacci_async_does_not_block_the_caller() {
    let (open, gate) = channel();
    let core = GatedCore {
        gate: Mutex::new(gate),
    };
    let sdk = Sdk::new(core, SdkConfig::default().with_worker_threads(1)).unwrap();

    // The worker cannot finish until this task runs, which it can only do if
    // awaiting the result leaves the runtime thread free.
    let pending = sdk.fibonacci_async(8);
    let release = async move {
        tokio::task::yield_now().await;
        open.send(()).unwrap();
    };

    let (result, ()) = tokio::time::timeout(Duration::from_secs(10), async {
        tokio::join!(pending, release)
    })
    .await
    .expect("fibonacci_async blocked the caller");
    assert_eq!(result, Ok(21));
}

#[test]
fn benchmark_reports_a_small_mean() {
    let sdk = linked();
    assert_eq!(sdk.benchmark(0), Duration::ZERO);
    assert!(sdk.benchmark(100) < Duration::from_millis(1));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn add_matches_wrapping_sum(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(linked_add(a, b), a.wrapping_add(b));
    }

    #[test]
    fn concurrent_first_initialize_hits_core_once(threads in 2usize..16) {
        let sdk = Arc::new(
            Sdk::new(CountingCore::default(), SdkConfig::default().with_worker_threads(1)).unwrap(),
        );
        let probe = Arc::clone(&sdk);
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let sdk = Arc::clone(&sdk);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    sdk.initialize()
                })
            })
            .collect();
        for handle in handles {
            prop_assert!(handle.join().unwrap());
        }
        prop_assert_eq!(init_calls(&probe), 1);
    }
}

fn linked_add(a: i32, b: i32) -> i32 {
    static SDK: std::sync::OnceLock<Sdk> = std::sync::OnceLock::new();
    SDK.get_or_init(linked).add(a, b)
}

fn init_calls(sdk: &Sdk<CountingCore>) -> usize {
    sdk.core().init_calls.load(Ordering::SeqCst)
}
