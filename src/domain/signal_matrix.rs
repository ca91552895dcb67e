/// Multi-channel signal, stored channel-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalMatrix {
    channels: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("signal has no samples")]
    Empty,
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    Ragged {
        channel: usize,
        expected: usize,
        actual: usize,
    },
    #[error("signal has {actual} samples after downsampling, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("cannot interpret {rows}x{columns} matrix as {channel_count}-channel signal")]
    Shape {
        rows: usize,
        columns: usize,
        channel_count: usize,
    },
}

/// Keeps every `factor`-th sample starting at index 0.
///
/// No anti-alias filtering is applied. Trailing samples that do not fill a
/// full stride are dropped, so the output has `len / factor` samples.
pub fn downsample(samples: &[f64], factor: usize) -> Result<Vec<f64>, SignalError> {
    if factor == 0 {
        return Err(SignalError::InvalidArgument(
            "decimation factor must be positive".to_string(),
        ));
    }
    if samples.is_empty() {
        return Err(SignalError::InvalidArgument(
            "cannot downsample an empty signal".to_string(),
        ));
    }

    let kept = samples.len() / factor;
    Ok(samples.iter().step_by(factor).take(kept).copied().collect())
}

/// Integer factor that reduces `len` samples to roughly `target`.
pub fn decimation_factor(len: usize, target: usize) -> Result<usize, SignalError> {
    if target == 0 {
        return Err(SignalError::InvalidArgument(
            "target sample count must be positive".to_string(),
        ));
    }
    match len / target {
        0 => Err(SignalError::InvalidArgument(format!(
            "signal has {} samples, fewer than the target {}",
            len, target
        ))),
        factor => Ok(factor),
    }
}

impl SignalMatrix {
    pub fn new(channels: Vec<Vec<f64>>) -> Result<Self, SignalError> {
        let expected = channels.first().map(Vec::len).ok_or(SignalError::Empty)?;
        if expected == 0 {
            return Err(SignalError::Empty);
        }
        if let Some((channel, actual)) = channels
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(SignalError::Ragged {
                channel,
                expected,
                actual,
            });
        }
        Ok(Self { channels })
    }

    /// Accepts either a channel-major (`channel_count` rows) or a
    /// sample-major (`channel_count` columns) matrix.
    pub fn from_rows(rows: Vec<Vec<f64>>, channel_count: usize) -> Result<Self, SignalError> {
        if channel_count == 0 {
            return Err(SignalError::InvalidArgument(
                "channel count must be positive".to_string(),
            ));
        }
        if rows.is_empty() {
            return Err(SignalError::Empty);
        }

        if rows.len() == channel_count {
            return Self::new(rows);
        }

        let columns = rows[0].len();
        if rows.iter().all(|row| row.len() == channel_count) {
            let mut channels = vec![Vec::with_capacity(rows.len()); channel_count];
            for row in rows {
                for (channel, value) in channels.iter_mut().zip(row) {
                    channel.push(value);
                }
            }
            return Self::new(channels);
        }

        Err(SignalError::Shape {
            rows: rows.len(),
            columns,
            channel_count,
        })
    }

    /// Decodes little-endian `i16` samples interleaved sample-major.
    pub fn from_interleaved_i16(bytes: &[u8], channel_count: usize) -> Result<Self, SignalError> {
        if channel_count == 0 {
            return Err(SignalError::InvalidArgument(
                "channel count must be positive".to_string(),
            ));
        }
        let frame_bytes = 2 * channel_count;
        if bytes.is_empty() {
            return Err(SignalError::Empty);
        }
        if bytes.len() % frame_bytes != 0 {
            return Err(SignalError::InvalidArgument(format!(
                "{} bytes is not a whole number of {}-channel i16 frames",
                bytes.len(),
                channel_count
            )));
        }

        let frames = bytes.len() / frame_bytes;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in bytes.chunks_exact(frame_bytes) {
            for (channel, sample) in channels.iter_mut().zip(frame.chunks_exact(2)) {
                channel.push(f64::from(i16::from_le_bytes([sample[0], sample[1]])));
            }
        }
        Self::new(channels)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn sample_count(&self) -> usize {
        self.channels[0].len()
    }

    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    pub fn downsample(&self, factor: usize) -> Result<Self, SignalError> {
        let channels = self
            .channels
            .iter()
            .map(|channel| downsample(channel, factor))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(channels)
    }

    /// Row-major `(samples, channels)` values.
    /// Rejects matrices whose length differs from the model input length.
    pub fn ensure_sample_count(&self, expected: usize) -> Result<(), SignalError> {
        let actual = self.sample_count();
        if actual == expected {
            Ok(())
        } else {
            Err(SignalError::Length { expected, actual })
        }
    }

    pub fn to_sample_major(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.sample_count() * self.channel_count());
        for sample in 0..self.sample_count() {
            for channel in &self.channels {
                values.push(channel[sample]);
            }
        }
        values
    }

    /// Sample-major rows, the shape written to prepared inputs.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.to_sample_major()
            .chunks(self.channel_count())
            .map(<[f64]>::to_vec)
            .collect()
    }
}
