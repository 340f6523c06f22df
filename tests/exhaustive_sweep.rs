use urx_corelib::harness::factor::{factorizations, FactorShifts};
use urx_corelib::{run, verify_width, HarnessConfig, Width};

#[test]
fn sweep_through_five_bits() {
    let mut progress = Vec::new();
    let report = run(&HarnessConfig::new(0, 6), &mut progress).expect("sweep must pass");
    assert_eq!(
        String::from_utf8(progress).unwrap(),
        "0 BITS\n1 BITS\n2 BITS\n3 BITS\n4 BITS\n5 BITS\n"
    );
    let counts: Vec<u64> = report.widths.iter().map(|w| w.factorizations).collect();
    assert_eq!(counts, vec![0, 0, 0, 55, 1096, 12100]);
    for w in &report.widths {
        assert_eq!(w.entropy_values, w.factorizations << w.bits);
    }
}

#[test]
fn raising_min_product_narrows_the_sweep() {
    let w = Width::new(4).unwrap();
    let full = verify_width(w, &HarnessConfig::default()).unwrap();
    let cfg = HarnessConfig {
        min_product: 128,
        ..HarnessConfig::default()
    };
    let narrow = verify_width(w, &cfg).unwrap();
    let expected: u64 = (128u64..256)
        .map(|p| factorizations(p, 16, FactorShifts::default()).count() as u64)
        .sum();
    assert_eq!(narrow.factorizations, expected);
    assert!(narrow.factorizations < full.factorizations);
}

#[test]
#[ignore = "several minutes in debug builds"]
fn sweep_six_and_seven_bits() {
    let mut progress = Vec::new();
    run(&HarnessConfig::new(6, 8), &mut progress).expect("sweep must pass");
    assert_eq!(String::from_utf8(progress).unwrap(), "6 BITS\n7 BITS\n");
}
