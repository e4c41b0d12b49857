/// Fixed-capacity feedback delay line.
///
/// The buffer is allocated once at construction; `set_delay` only moves the
/// read distance, so retiming never allocates.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
}

impl DelayLine {
    /// `capacity` is the longest delay the line can hold, in samples.
    pub fn new(capacity: usize) -> Self {
        let len = capacity.max(1) + 1;
        Self {
            buffer: vec![0.0; len],
            write_pos: 0,
            delay_samples: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Distance between write and read head, clamped to [1, capacity].
    pub fn set_delay(&mut self, delay_samples: usize) {
        self.delay_samples = delay_samples.clamp(1, self.capacity());
    }

    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Read the delayed sample, then write `input + delayed * feedback`.
    ///
    /// Returns the delayed (wet) sample.
    #[inline]
    pub fn process(&mut self, input: f32, feedback: f32) -> f32 {
        let len = self.buffer.len();
        let read_pos = (self.write_pos + len - self.delay_samples) % len;
        let delayed = self.buffer[read_pos];

        self.buffer[self.write_pos] = input + delayed * feedback;
        self.write_pos = (self.write_pos + 1) % len;

        delayed
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
