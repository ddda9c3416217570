use convoy_core::bucket::{Bucket, TimeUS};
use convoy_testutils::bucket::MyBucket;

#[test]
fn test_bucket_update() {
    let mut bucket = MyBucket::default();
    bucket.initialize(TimeUS::ZERO);
    assert!(bucket.initialized);
    assert_eq!(bucket.step, TimeUS::ZERO);
    bucket.before_agents(TimeUS::from(1));
    assert_eq!(bucket.step, TimeUS::from(1));
    bucket.after_agents(TimeUS::from(2));
    assert_eq!(bucket.step, TimeUS::from(2));
}

#[test]
fn test_time_arithmetic() {
    let guard = TimeUS::from_secs(0.1).unwrap();
    let horizon = TimeUS::from_secs(40.0).unwrap();
    assert_eq!(horizon - guard, TimeUS::from(39_900_000));
    assert_eq!(guard + guard, TimeUS::from(200_000));
    assert_eq!(guard.checked_sub(horizon), None);
    assert_eq!(TimeUS(u64::MAX).checked_add(TimeUS::from(1)), None);
    assert_eq!(TimeUS::from(1000).checked_mul(4), Some(TimeUS::from(4000)));
}

#[test]
fn test_time_display_and_parsing() {
    assert_eq!(TimeUS::from(8_000_000).as_secs(), 8.0);
    assert_eq!("4000".parse::<TimeUS>().unwrap(), TimeUS::from(4000));
    assert!(TimeUS::default().is_zero());
}
