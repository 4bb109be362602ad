mod common;

use common::QuadraticForm;
use lp_hessian::{
    AutodiffHessian, FiniteDiffHessian, LogProbObjective, compute_hessian_with, hessian_vector_product,
};
use proptest::prelude::*;

fn symmetric_3x3() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-5.0..5.0f64, 6).prop_map(|u| {
        // upper triangle: a00 a01 a02 a11 a12 a22
        vec![u[0], u[1], u[2], u[1], u[3], u[4], u[2], u[4], u[5]]
    })
}

proptest! {
    #[test]
    fn quadratic_hessian_is_exact(a in symmetric_3x3(), x in prop::collection::vec(-10.0..10.0f64, 3)) {
        let mut model = QuadraticForm::new(3, a.clone());
        let r = compute_hessian_with(&AutodiffHessian, &mut model, &x, false).unwrap();
        for i in 0..3 {
            let mut ax = 0.0;
            for j in 0..3 {
                prop_assert!((r.hessian[(i, j)] - 2.0 * a[i * 3 + j]).abs() < 1e-9);
                ax += a[i * 3 + j] * x[j];
            }
            prop_assert!((r.grad_log_prob[i] - 2.0 * ax).abs() < 1e-9 * (1.0 + ax.abs()));
        }
    }

    #[test]
    fn both_engines_return_symmetric_matrices(a in symmetric_3x3(), x in prop::collection::vec(-3.0..3.0f64, 3)) {
        let mut model = QuadraticForm::new(3, a);
        let ad = compute_hessian_with(&AutodiffHessian, &mut model, &x, false).unwrap();
        let fd = compute_hessian_with(&FiniteDiffHessian::default(), &mut model, &x, false).unwrap();
        prop_assert!(ad.is_symmetric(1e-12));
        prop_assert_eq!(fd.max_asymmetry(), 0.0);
    }

    #[test]
    fn hvp_is_linear_in_direction(
        a in symmetric_3x3(),
        x in prop::collection::vec(-3.0..3.0f64, 3),
        v in prop::collection::vec(-3.0..3.0f64, 3),
    ) {
        let mut model = QuadraticForm::new(3, a.clone());
        let (_, hv) = hessian_vector_product(&mut LogProbObjective::new(&mut model, false), &x, &v).unwrap();
        for i in 0..3 {
            let expected: f64 = (0..3).map(|j| 2.0 * a[i * 3 + j] * v[j]).sum();
            prop_assert!((hv[i] - expected).abs() < 1e-9);
        }
    }
}
