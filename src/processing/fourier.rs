// src/processing/fourier.rs
//! Discrete Fourier transform helpers
//!
//! Used once per ECG session to turn the stored harmonic table back into a
//! time-domain period. Both directions run through `rustfft`; the inverse
//! accepts a spectrum of any length and reconstructs `period` samples, so a
//! truncated harmonic table can be expanded to a full period.

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward DFT: `X[k] = sum_i x[i] * exp(-2*pi*j*k*i/N)`
pub fn forward(signal: &[Complex64]) -> Vec<Complex64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut buffer = signal.to_vec();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(buffer.len()).process(&mut buffer);
    buffer
}

/// Inverse DFT over `period` output samples
///
/// `x[k] = (1/period) * sum_i X[i] * exp(2*pi*j*k*i/period)` for `k < period`.
/// Spectra shorter than `period` are zero-padded; longer spectra fold their
/// excess bins onto `i mod period`, which is what the direct sum computes.
pub fn inverse(spectrum: &[Complex64], period: usize) -> Vec<Complex64> {
    if period == 0 {
        return Vec::new();
    }

    let mut buffer = vec![Complex64::new(0.0, 0.0); period];
    for (index, bin) in spectrum.iter().enumerate() {
        buffer[index % period] += *bin;
    }

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(period).process(&mut buffer);

    let scale = 1.0 / period as f64;
    buffer.iter_mut().for_each(|value| *value *= scale);
    buffer
}

/// Real part of a one-sided harmonic reconstruction
pub fn reconstruct_real(harmonics: &[Complex64], period: usize) -> Vec<f64> {
    inverse(harmonics, period).into_iter().map(|value| value.re).collect()
}
