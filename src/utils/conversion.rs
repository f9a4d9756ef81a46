// src/utils/conversion.rs
//! Conversion helpers between samples, pressure units and event payloads

/// Encode one sample as the 4-byte little-endian payload of a data event
pub fn sample_to_bytes(sample: i32) -> [u8; 4] {
    sample.to_le_bytes()
}

/// Decode a data event payload back into its sample
///
/// Returns `None` when the payload is not exactly four bytes long.
pub fn bytes_to_sample(payload: &[u8]) -> Option<i32> {
    let bytes: [u8; 4] = payload.try_into().ok()?;
    Some(i32::from_le_bytes(bytes))
}

/// Raw-ADC-unit to mmHg gain of a pressure channel
///
/// `gain = 7.5 * ref_level / 2^bit_depth / channel_coeff / sensitivity_coeff`.
/// Degenerate calibration (zero coefficients) yields a gain of zero rather
/// than infinity, which keeps the integrator clamped at zero.
pub fn pressure_gain(bit_depth: f64, ref_level: f64, channel_coeff: f64, sensitivity_coeff: f64) -> f64 {
    use crate::config::constants::pressure::GAIN_NUMERATOR;

    let gain = GAIN_NUMERATOR * ref_level / 2f64.powf(bit_depth) / channel_coeff / sensitivity_coeff;
    if gain.is_finite() && gain > 0.0 {
        gain
    } else {
        0.0
    }
}

/// Saturating conversion from a floating sample to the wire integer type
pub fn saturate_sample(value: f64) -> i32 {
    // `as` saturates and maps NaN to zero.
    value as i32
}
