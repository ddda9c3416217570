use convoy_models::dist::{DistError, DistParams, DistType, RngSampler};

fn params(dist_name: &str) -> DistParams {
    DistParams {
        dist_name: dist_name.to_string(),
        seed: Some(7),
        value: None,
        mean: None,
        std_dev: None,
        min: None,
        max: None,
    }
}

#[test]
fn test_constant_speed() {
    let mut sampler = RngSampler::new(&DistParams::constant(30.0)).unwrap();
    assert_eq!(sampler.sample(), 30.0);
    assert_eq!(sampler.sample(), 30.0);
}

#[test]
fn test_uniform_speed_stays_in_range() {
    let mut uniform = params("Uniform");
    uniform.min = Some(20.0);
    uniform.max = Some(40.0);
    let mut sampler = RngSampler::new(&uniform).unwrap();
    for _ in 0..100 {
        let speed = sampler.sample();
        assert!((20.0..40.0).contains(&speed));
    }
}

#[test]
fn test_seed_reproduces_speeds() {
    let mut normal = params("normal");
    normal.mean = Some(30.0);
    normal.std_dev = Some(5.0);
    let mut first = RngSampler::new(&normal).unwrap();
    let mut second = RngSampler::new(&normal).unwrap();
    for _ in 0..10 {
        assert_eq!(first.sample(), second.sample());
    }
}

#[test]
fn test_invalid_distributions() {
    assert_eq!(
        DistType::new(&params("poisson")).unwrap_err(),
        DistError::UnknownDistribution("poisson".to_string())
    );
    assert_eq!(
        DistType::new(&params("constant")).unwrap_err(),
        DistError::Missing("value")
    );
    let mut uniform = params("uniform");
    uniform.min = Some(5.0);
    uniform.max = Some(5.0);
    assert!(matches!(
        DistType::new(&uniform),
        Err(DistError::Invalid(_))
    ));
}
