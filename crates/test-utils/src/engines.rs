//! Projection engine doubles.
//!
//! These wrap or replace a real [`ProjectionEngine`] so tests can check how
//! often handles are built and what happens when the engine fails.

use nalgebra::Vector3;
use projection::{EngineError, ProjectionEngine};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps an engine and counts calls.
#[derive(Debug, Default)]
pub struct CountingEngine<E> {
    inner: E,
    constructs: AtomicUsize,
    transforms: AtomicUsize,
}

impl<E> CountingEngine<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            constructs: AtomicUsize::new(0),
            transforms: AtomicUsize::new(0),
        }
    }

    /// Number of handles built so far.
    pub fn constructs(&self) -> usize {
        self.constructs.load(Ordering::SeqCst)
    }

    /// Number of transforms performed so far.
    pub fn transforms(&self) -> usize {
        self.transforms.load(Ordering::SeqCst)
    }
}

impl<E: ProjectionEngine> ProjectionEngine for CountingEngine<E> {
    type Handle = E::Handle;

    fn construct(&self, spec: &str) -> Result<Self::Handle, EngineError> {
        self.constructs.fetch_add(1, Ordering::SeqCst);
        self.inner.construct(spec)
    }

    fn transform(
        &self,
        source: &Self::Handle,
        target: &Self::Handle,
        coord: Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError> {
        self.transforms.fetch_add(1, Ordering::SeqCst);
        self.inner.transform(source, target, coord)
    }
}

/// Where a [`FailingEngine`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    /// Every `construct` call fails.
    Construct,
    /// Handles build, every `transform` call fails.
    Transform,
}

/// An engine that always fails at one point.
///
/// Handles are the spec strings they were built from.
#[derive(Debug, Clone, Copy)]
pub struct FailingEngine {
    point: FailurePoint,
}

impl FailingEngine {
    pub fn on_construct() -> Self {
        Self {
            point: FailurePoint::Construct,
        }
    }

    pub fn on_transform() -> Self {
        Self {
            point: FailurePoint::Transform,
        }
    }
}

impl ProjectionEngine for FailingEngine {
    type Handle = String;

    fn construct(&self, spec: &str) -> Result<String, EngineError> {
        match self.point {
            FailurePoint::Construct => Err(EngineError::InvalidSpec {
                spec: spec.to_string(),
                message: "rejected by test engine".to_string(),
            }),
            FailurePoint::Transform => Ok(spec.to_string()),
        }
    }

    fn transform(
        &self,
        source: &String,
        target: &String,
        _coord: Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError> {
        Err(EngineError::TransformFailed(format!(
            "{} -> {}: rejected by test engine",
            source, target
        )))
    }
}

/// An engine that passes coordinates through unchanged.
///
/// Useful where only the spec strings or placement arithmetic matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityEngine;

impl ProjectionEngine for IdentityEngine {
    type Handle = String;

    fn construct(&self, spec: &str) -> Result<String, EngineError> {
        Ok(spec.to_string())
    }

    fn transform(
        &self,
        _source: &String,
        _target: &String,
        coord: Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError> {
        Ok(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_engine_counts() {
        let engine = CountingEngine::new(IdentityEngine);
        let a = engine.construct("+proj=longlat").unwrap();
        let b = engine.construct("+proj=eqc").unwrap();
        let out = engine.transform(&a, &b, Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(out, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(engine.constructs(), 2);
        assert_eq!(engine.transforms(), 1);
    }

    #[test]
    fn test_failing_engine() {
        assert!(FailingEngine::on_construct().construct("+proj=eqc").is_err());

        let engine = FailingEngine::on_transform();
        let handle = engine.construct("+proj=eqc").unwrap();
        assert!(engine.transform(&handle, &handle, Vector3::zeros()).is_err());
    }
}
