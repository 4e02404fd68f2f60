//! Equivalence tests for interleaving strategies
//!
//! Verifies that every vectorised strategy produces exactly the buffer the
//! scalar double loop produces.

use interleave_bench::strategies::{
    baseline, column_stack, fused_loop, parallel_fill, preallocated, stack_transpose,
    transform_matrix,
};
use interleave_bench::{BenchConfig, FunctionSet, InterleaveError, Layout, Strategy, WIDTH};

/// Compare two buffers elementwise (allowing NaN == NaN)
fn buffers_equal(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
}

fn assert_matches_baseline(fs: &FunctionSet, elements: usize) {
    let layout = Layout::new(elements).unwrap();
    let expected = baseline(fs, &layout);

    let candidates = [
        ("column_stack", column_stack(fs, &layout).unwrap()),
        ("stack_transpose", stack_transpose(fs, &layout).unwrap()),
        ("preallocated", preallocated(fs, &layout).unwrap()),
    ];
    for (name, got) in candidates {
        assert!(
            buffers_equal(&got, &expected),
            "{}: differs from baseline at {} elements",
            name,
            elements
        );
    }
}

#[test]
fn test_linear_two_indices() {
    // Indices [0, 1] -> [f0(0), f1(0), f2(0), f3(0), f0(1), f1(1), f2(1), f3(1)]
    let fs = FunctionSet::linear();
    let layout = Layout::new(8).unwrap();
    let expected = vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0];

    for strategy in Strategy::ALL {
        let got = strategy.run_layout(&fs, &layout, 1 << 20).unwrap();
        assert_eq!(got, expected, "{}", strategy.name());
    }
}

#[test]
fn test_equivalence_standard_functions() {
    assert_matches_baseline(&FunctionSet::standard(), 40_000);
}

#[test]
fn test_equivalence_linear_functions() {
    assert_matches_baseline(&FunctionSet::linear(), 1_024);
}

#[test]
fn test_equivalence_custom_closures() {
    let offset = 0.25;
    let fs = FunctionSet::new(
        "custom",
        move |x: f64| x + offset,
        |x: f64| x * x,
        |x: f64| (x + 1.0).ln(),
        |x: f64| if x % 2.0 == 0.0 { f64::NAN } else { -x },
    );
    assert_matches_baseline(&fs, 400);
}

#[test]
fn test_equivalence_empty_buffer() {
    assert_matches_baseline(&FunctionSet::standard(), 0);
}

#[test]
fn test_matrix_matches_baseline_when_it_fits() {
    let fs = FunctionSet::standard();
    let layout = Layout::new(400).unwrap();
    let got = transform_matrix(&fs, &layout, 1 << 24).unwrap();
    assert!(buffers_equal(&got, &baseline(&fs, &layout)));
}

#[test]
fn test_matrix_full_size_does_not_panic() {
    // Default config: ten million elements, 1 GiB matrix ceiling
    let result = Strategy::TransformMatrix.run(&FunctionSet::standard(), &BenchConfig::default());
    assert!(matches!(
        result,
        Err(InterleaveError::InsufficientMemory { .. })
    ));
}

#[test]
fn test_fixed_kernels_match_standard_baseline() {
    let layout = Layout::new(WIDTH * 50_000).unwrap();
    let expected = baseline(&FunctionSet::standard(), &layout);

    assert!(buffers_equal(&fused_loop(&layout), &expected), "fused_loop");
    assert!(buffers_equal(&parallel_fill(&layout), &expected), "parallel_fill");
}
