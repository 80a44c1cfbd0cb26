//! Master buffer for overlap-add mixing of note waveforms.

/// Accumulator for a whole piece.
///
/// Notes are summed in at their sample offsets; overlapping notes add, with
/// no clipping or voice stealing. Samples that would land past the end are
/// dropped and counted.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterBuffer {
    samples: Vec<f64>,
}

impl MasterBuffer {
    /// Creates a silent buffer of `num_samples`.
    pub fn new(num_samples: usize) -> Self {
        Self {
            samples: vec![0.0; num_samples],
        }
    }

    /// Number of samples in the buffer.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Read-only view of the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Adds `waveform` starting at `offset`.
    ///
    /// # Returns
    /// Number of samples that fell past the end of the buffer.
    pub fn add_at(&mut self, offset: usize, waveform: &[f64]) -> usize {
        let start = offset.min(self.samples.len());
        let available = self.samples.len() - start;
        let written = waveform.len().min(available);

        for (dst, &src) in self.samples[start..start + written]
            .iter_mut()
            .zip(waveform)
        {
            *dst += src;
        }

        waveform.len() - written
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        peak(&self.samples)
    }

    /// Scales the buffer so its peak is 1.0.
    ///
    /// # Returns
    /// The peak before scaling. A silent buffer is left untouched and 0.0 is
    /// returned.
    pub fn normalize_peak(&mut self) -> f64 {
        let current_peak = self.peak();
        if current_peak > 0.0 {
            for sample in self.samples.iter_mut() {
                *sample /= current_peak;
            }
        }
        current_peak
    }

    /// Consumes the buffer and returns its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// Largest absolute value in `samples`, 0.0 when empty.
pub fn peak(samples: &[f64]) -> f64 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f64, |a, b| a.max(b))
}
