//! Compose two independent 1D axis calls of a **SequenceProvider** into
//! a 2D point set.

// std
use std::convert::TryFrom;
// others
use tracing::debug;
// viewpoints
use crate::core::error::ViewpointsError;
use crate::core::geometry::PointSet;
use crate::core::sequence::{SequenceProvider, SequenceRequest};
use crate::core::viewpoints::{Float, Result};

pub struct PointSetBuilder<P: SequenceProvider> {
    pub provider: P,
}

impl<P: SequenceProvider> PointSetBuilder<P> {
    pub fn new(provider: P) -> Self {
        PointSetBuilder { provider }
    }
    /// Generates the point set for *request*. Every call asks the
    /// provider again, nothing is cached.
    pub fn build(&self, request: &SequenceRequest) -> Result<PointSet> {
        if request.count < 0 {
            return Err(ViewpointsError::InvalidRequest(format!(
                "negative point count {}",
                request.count
            )));
        }
        let n: u32 = u32::try_from(request.count).map_err(|_| {
            ViewpointsError::InvalidRequest(format!("point count {} out of range", request.count))
        })?;
        let resolved = request.resolve();
        if !self.provider.supports(&resolved.family) {
            return Err(ViewpointsError::InvalidRequest(format!(
                "sequence {:?} is not provided by {}",
                resolved.family,
                self.provider.name()
            )));
        }
        let mut u: Vec<Float> = vec![0.0 as Float; n as usize];
        let mut v: Vec<Float> = vec![0.0 as Float; n as usize];
        debug!(
            family = %resolved.family,
            n,
            dim = request.dimension_u,
            seed = resolved.seed_u,
            "generating u axis"
        );
        self.provider
            .genpoints(&resolved.family, request.dimension_u, resolved.seed_u, &mut u)?;
        debug!(
            family = %resolved.family,
            n,
            dim = request.dimension_v,
            seed = resolved.seed_v,
            "generating v axis"
        );
        self.provider
            .genpoints(&resolved.family, request.dimension_v, resolved.seed_v, &mut v)?;
        Ok(PointSet::from_axes(&u, &v))
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use super::*;
    use crate::core::sequence::{SOBOL_OWEN, SOBOL_OWEN_DECORRELATED};

    /// Writes values derived from (dim, seed, index) and remembers
    /// every call.
    struct RecordingProvider {
        names: Vec<String>,
        calls: RefCell<Vec<(String, usize, u32, u32)>>,
    }

    impl RecordingProvider {
        fn new() -> Self {
            RecordingProvider {
                names: vec!["random".to_string(), SOBOL_OWEN.to_string()],
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl SequenceProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }
        fn genpoints(&self, family: &str, dim: u32, seed: u32, out: &mut [Float]) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((family.to_string(), out.len(), dim, seed));
            for (i, value) in out.iter_mut().enumerate() {
                let h = (seed as usize * 31 + dim as usize * 7 + i * 13) % 97;
                *value = h as Float / 97.0 as Float;
            }
            Ok(())
        }
        fn sequence_names(&self) -> Option<&[String]> {
            Some(&self.names)
        }
    }

    #[test]
    fn decorrelated_alias_issues_two_calls() {
        let builder = PointSetBuilder::new(RecordingProvider::new());
        let request = SequenceRequest::new(SOBOL_OWEN_DECORRELATED, 8, 0, 1, 5);
        let points = builder.build(&request).unwrap();
        assert_eq!(points.len(), 8);
        let calls = builder.provider.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                (SOBOL_OWEN.to_string(), 8, 0, 5),
                (SOBOL_OWEN.to_string(), 8, 1, 6),
            ]
        );
    }

    #[test]
    fn plain_family_uses_same_seed_for_both_axes() {
        let builder = PointSetBuilder::new(RecordingProvider::new());
        let request = SequenceRequest::new("random", 4, 3, 2, 9);
        builder.build(&request).unwrap();
        let calls = builder.provider.calls.borrow();
        assert_eq!(
            *calls,
            vec![
                ("random".to_string(), 4, 3, 9),
                ("random".to_string(), 4, 2, 9),
            ]
        );
    }

    #[test]
    fn axes_are_zipped_in_order() {
        let builder = PointSetBuilder::new(RecordingProvider::new());
        let request = SequenceRequest::new("random", 5, 0, 1, 2);
        let points = builder.build(&request).unwrap();
        let mut u = vec![0.0 as Float; 5];
        let mut v = vec![0.0 as Float; 5];
        let stub = RecordingProvider::new();
        stub.genpoints("random", 0, 2, &mut u).unwrap();
        stub.genpoints("random", 1, 2, &mut v).unwrap();
        for i in 0..5 {
            assert_eq!(points[i].x, u[i]);
            assert_eq!(points[i].y, v[i]);
        }
    }

    #[test]
    fn identical_requests_give_identical_point_sets() {
        let builder = PointSetBuilder::new(RecordingProvider::new());
        let request = SequenceRequest::new(SOBOL_OWEN, 64, 0, 1, 3);
        let first = builder.build(&request).unwrap();
        let second = builder.build(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_request_gives_empty_set() {
        let builder = PointSetBuilder::new(RecordingProvider::new());
        let request = SequenceRequest::new("random", 0, 0, 1, 1);
        assert!(builder.build(&request).unwrap().is_empty());
    }

    #[test]
    fn negative_count_is_rejected_before_provider_call() {
        let builder = PointSetBuilder::new(RecordingProvider::new());
        let request = SequenceRequest::new("random", -1, 0, 1, 1);
        let err = builder.build(&request).unwrap_err();
        assert!(err.is_invalid_request());
        assert!(builder.provider.calls.borrow().is_empty());
    }

    #[test]
    fn unknown_family_is_rejected() {
        let builder = PointSetBuilder::new(RecordingProvider::new());
        let request = SequenceRequest::new("faure05", 4, 0, 1, 1);
        let err = builder.build(&request).unwrap_err();
        assert!(err.is_invalid_request());
        assert!(builder.provider.calls.borrow().is_empty());
    }

    #[test]
    fn builder_accepts_borrowed_provider() {
        let stub = RecordingProvider::new();
        let builder = PointSetBuilder::new(&stub);
        let request = SequenceRequest::new("random", 2, 0, 1, 1);
        assert_eq!(builder.build(&request).unwrap().len(), 2);
        assert_eq!(stub.calls.borrow().len(), 2);
    }
}
