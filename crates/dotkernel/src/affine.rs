//! Dense (affine) layer: `y = W x + b`.
//!
//! Weights are stored row-major, one row of `IN` weights per output neuron,
//! so each output is a single fixed-length dot product. With `IN` a multiple
//! of 32 and `T = f32` every row goes through the accelerated kernel.

use crate::element::Element;
use crate::error::{Error, Result};
use crate::kernel::DotKernel;
use crate::vector::StackVector;

/// Dense layer with `IN` inputs and `OUT` outputs.
#[derive(Clone, PartialEq)]
pub struct Affine<T, const IN: usize, const OUT: usize> {
    weights: Box<[StackVector<T, IN>]>,
    bias: StackVector<T, OUT>,
}

impl<T: Element, const IN: usize, const OUT: usize> Affine<T, IN, OUT> {
    /// Number of weights (`IN * OUT`).
    pub const WEIGHT_COUNT: usize = IN * OUT;

    /// Builds a layer from `OUT` weight rows and a bias.
    pub fn from_rows(rows: Vec<[T; IN]>, bias: [T; OUT]) -> Result<Self> {
        if rows.len() != OUT {
            return Err(Error::ShapeMismatch {
                what: "weight rows",
                expected: OUT,
                actual: rows.len(),
            });
        }
        Ok(Self {
            weights: rows.into_iter().map(StackVector::from_array).collect(),
            bias: StackVector::from_array(bias),
        })
    }

    /// Builds a layer from row-major weights (`OUT * IN` values) and a bias.
    pub fn from_flat(weights: &[T], bias: &[T]) -> Result<Self> {
        if weights.len() != Self::WEIGHT_COUNT {
            return Err(Error::ShapeMismatch {
                what: "weights",
                expected: Self::WEIGHT_COUNT,
                actual: weights.len(),
            });
        }
        let bias = StackVector::from_slice(bias).map_err(|_| Error::ShapeMismatch {
            what: "bias",
            expected: OUT,
            actual: bias.len(),
        })?;

        let weights = if IN == 0 {
            vec![StackVector::zeros(); OUT].into_boxed_slice()
        } else {
            weights
                .chunks_exact(IN)
                .map(StackVector::<T, IN>::from_slice)
                .collect::<Result<Box<[_]>>>()?
        };
        Ok(Self { weights, bias })
    }

    /// Weight row feeding output `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[T; IN]> {
        self.weights.get(i).map(|row| &row.data)
    }

    /// The bias vector.
    #[must_use]
    pub fn bias(&self) -> &StackVector<T, OUT> {
        &self.bias
    }

    /// `y[i] = bias[i] + dot(x, W[i])`, using the process-wide kernel selection.
    #[must_use]
    pub fn forward(&self, x: &StackVector<T, IN>) -> StackVector<T, OUT> {
        let mut out = self.bias;
        for (y, row) in out.data.iter_mut().zip(self.weights.iter()) {
            *y = *y + x.dot(&row.data);
        }
        out
    }

    /// Same as [`Affine::forward`], with the kernel fixed at compile time.
    #[must_use]
    pub fn forward_with<K: DotKernel<T>>(
        &self,
        kernel: &K,
        x: &StackVector<T, IN>,
    ) -> StackVector<T, OUT> {
        let mut out = self.bias;
        for (y, row) in out.data.iter_mut().zip(self.weights.iter()) {
            *y = *y + kernel.dot(&x.data, &row.data);
        }
        out
    }
}

impl<T: std::fmt::Debug, const IN: usize, const OUT: usize> std::fmt::Debug
    for Affine<T, IN, OUT>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Affine")
            .field("inputs", &IN)
            .field("outputs", &OUT)
            .finish_non_exhaustive()
    }
}
