use anchor_lang::prelude::*;
use bytemuck::Zeroable;

use crate::constants::*;
use crate::errors::AmmError;

/// One price sample
#[zero_copy]
#[repr(C)]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Running sum of token 0 price (Q32) times elapsed seconds
    pub cumulative_token_0_price_x32: u128,
    /// Running sum of token 1 price (Q32) times elapsed seconds
    pub cumulative_token_1_price_x32: u128,
    /// Timestamp of the sample
    pub block_timestamp: u64,
    pub padding: u64,
}

impl Observation {
    fn new(block_timestamp: u64, cumulative_0: u128, cumulative_1: u128) -> Self {
        Self {
            cumulative_token_0_price_x32: cumulative_0,
            cumulative_token_1_price_x32: cumulative_1,
            block_timestamp,
            padding: 0,
        }
    }
}

/// Ring buffer of price samples for time-weighted averages. Loaded in place
/// through `AccountLoader`; the layout has no implicit padding.
/// PDA Seeds: ["observation", pool]
#[account(zero_copy)]
#[repr(C)]
#[derive(Debug)]
pub struct ObservationState {
    /// Pool the samples belong to
    pub pool_id: Pubkey,

    /// Index of the most recent sample
    pub observation_index: u16,

    /// Non-zero once the first sample has been written
    pub initialized: u8,

    pub padding_header: [u8; 13],

    pub observations: [Observation; OBSERVATION_NUM],

    /// Reserved for future upgrades
    pub padding: [u64; 4],
}

impl Default for ObservationState {
    fn default() -> Self {
        Zeroable::zeroed()
    }
}

impl ObservationState {
    /// Append a sample for `block_timestamp` using the prices that held since
    /// the previous sample. At most one sample is written per timestamp; a
    /// timestamp not after the latest sample is ignored.
    pub fn update(
        &mut self,
        block_timestamp: u64,
        token_0_price_x32: u128,
        token_1_price_x32: u128,
    ) -> Result<()> {
        let observation_index = usize::from(self.observation_index);

        if !self.is_initialized() {
            self.initialized = 1;
            self.observations[observation_index] = Observation::new(block_timestamp, 0, 0);
            return Ok(());
        }

        let last_observation = self.observations[observation_index];
        if block_timestamp <= last_observation.block_timestamp {
            return Ok(());
        }
        let delta_time = u128::from(block_timestamp - last_observation.block_timestamp);

        let delta_token_0_price_x32 = token_0_price_x32
            .checked_mul(delta_time)
            .ok_or(AmmError::MathOverflow)?;
        let delta_token_1_price_x32 = token_1_price_x32
            .checked_mul(delta_time)
            .ok_or(AmmError::MathOverflow)?;

        let next_observation_index = (observation_index + 1) % OBSERVATION_NUM;
        // cumulative sums wrap; readers only use differences
        self.observations[next_observation_index] = Observation::new(
            block_timestamp,
            last_observation
                .cumulative_token_0_price_x32
                .wrapping_add(delta_token_0_price_x32),
            last_observation
                .cumulative_token_1_price_x32
                .wrapping_add(delta_token_1_price_x32),
        );
        self.observation_index = next_observation_index as u16;

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized != 0
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<Observation> {
        if !self.is_initialized() {
            return None;
        }
        Some(self.observations[usize::from(self.observation_index)])
    }

    /// Oldest sample still held in the ring
    pub fn oldest(&self) -> Option<Observation> {
        if !self.is_initialized() {
            return None;
        }
        let next = (usize::from(self.observation_index) + 1) % OBSERVATION_NUM;
        let candidate = self.observations[next];
        // unwritten slots are zeroed until the ring wraps once
        if candidate.block_timestamp == 0 {
            Some(self.observations[0])
        } else {
            Some(candidate)
        }
    }

    /// Time-weighted average prices (Q32) between the oldest and newest samples
    pub fn twap_x32(&self) -> Option<(u128, u128)> {
        let oldest = self.oldest()?;
        let latest = self.latest()?;
        let elapsed = latest.block_timestamp.checked_sub(oldest.block_timestamp)?;
        if elapsed == 0 {
            return None;
        }
        let elapsed = u128::from(elapsed);
        Some((
            latest
                .cumulative_token_0_price_x32
                .wrapping_sub(oldest.cumulative_token_0_price_x32)
                / elapsed,
            latest
                .cumulative_token_1_price_x32
                .wrapping_sub(oldest.cumulative_token_1_price_x32)
                / elapsed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_seeds_the_ring() {
        let mut state = ObservationState::default();
        assert!(state.latest().is_none());

        state.update(100, 5 * Q32, Q32 / 5).unwrap();

        let latest = state.latest().unwrap();
        assert_eq!(latest.block_timestamp, 100);
        assert_eq!(latest.cumulative_token_0_price_x32, 0);
        assert_eq!(state.observation_index, 0);
    }

    #[test]
    fn same_timestamp_appends_once() {
        let mut state = ObservationState::default();
        state.update(100, Q32, Q32).unwrap();
        state.update(110, Q32, Q32).unwrap();
        state.update(110, 9 * Q32, Q32).unwrap();

        assert_eq!(state.observation_index, 1);
        assert_eq!(state.latest().unwrap().cumulative_token_0_price_x32, 10 * Q32);
    }

    #[test]
    fn accumulates_price_times_elapsed() {
        let mut state = ObservationState::default();
        state.update(100, 0, 0).unwrap();
        state.update(110, 2 * Q32, Q32).unwrap();
        state.update(130, 4 * Q32, Q32).unwrap();

        let latest = state.latest().unwrap();
        assert_eq!(latest.cumulative_token_0_price_x32, 20 * Q32 + 80 * Q32);
        // (100 * Q32) / 30 seconds
        let (twap_0, twap_1) = state.twap_x32().unwrap();
        assert_eq!(twap_0, 100 * Q32 / 30);
        assert_eq!(twap_1, 30 * Q32 / 30);
    }

    #[test]
    fn oldest_sample_is_overwritten_when_full() {
        let mut state = ObservationState::default();
        for i in 0..(OBSERVATION_NUM as u64 + 5) {
            state.update(1_000 + i, Q32, Q32).unwrap();
        }

        assert_eq!(usize::from(state.observation_index), 4);
        assert_eq!(state.latest().unwrap().block_timestamp, 1_000 + OBSERVATION_NUM as u64 + 4);
        assert_eq!(state.oldest().unwrap().block_timestamp, 1_005);
        assert_eq!(state.twap_x32().unwrap(), (Q32, Q32));
    }

    #[test]
    fn overflowing_delta_is_an_error() {
        let mut state = ObservationState::default();
        state.update(1, 0, 0).unwrap();
        assert!(state.update(u64::MAX, u128::MAX / 2, 0).is_err());
        assert_eq!(state.observation_index, 0);
    }

    #[test]
    fn updates_write_through_account_bytes() {
        let size = std::mem::size_of::<ObservationState>();
        assert_eq!(size, 48 + 48 * OBSERVATION_NUM + 32);

        let mut words = vec![0u128; size / 16];
        let data: &mut [u8] = bytemuck::cast_slice_mut(&mut words);
        {
            let state: &mut ObservationState = bytemuck::from_bytes_mut(data);
            assert!(state.latest().is_none());
            state.update(100, Q32, Q32).unwrap();
        }

        // first sample's timestamp sits after the header and both cumulatives
        let timestamp = u64::from_le_bytes(data[80..88].try_into().unwrap());
        assert_eq!(timestamp, 100);
        assert_eq!(data[34], 1);
    }
}
