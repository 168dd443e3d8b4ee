//! Seeded, domain-separated random streams for list generation.
//!
//! Each concern draws from its own stream so that, for example, changing how
//! many reason templates exist never shifts which product an item is matched to.
use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Independent RNG streams derived from one user-visible seed.
#[derive(Debug, Clone)]
pub struct PackingRngs {
    seed: u64,
    identity: RefCell<CountingRng<SmallRng>>,
    matching: RefCell<CountingRng<SmallRng>>,
    recommend: RefCell<CountingRng<SmallRng>>,
    optional: RefCell<CountingRng<SmallRng>>,
    copy: RefCell<CountingRng<SmallRng>>,
}

/// Draw counts per stream, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamDraws {
    pub identity: u64,
    pub matching: u64,
    pub recommend: u64,
    pub optional: u64,
    pub copy: u64,
}

impl PackingRngs {
    /// Construct the streams from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            seed,
            identity: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"identity"))),
            matching: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"matching"))),
            recommend: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"recommend"))),
            optional: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"optional"))),
            copy: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"copy"))),
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream for list identifiers.
    #[must_use]
    pub fn identity(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.identity.borrow_mut()
    }

    /// Stream for picking among matched products for essentials.
    #[must_use]
    pub fn matching(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.matching.borrow_mut()
    }

    /// Stream for recommended-tier picks.
    #[must_use]
    pub fn recommend(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.recommend.borrow_mut()
    }

    /// Stream for optional-tier picks.
    #[must_use]
    pub fn optional(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.optional.borrow_mut()
    }

    /// Stream for cosmetic text choices.
    #[must_use]
    pub fn copy(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.copy.borrow_mut()
    }

    #[must_use]
    pub fn draws(&self) -> StreamDraws {
        StreamDraws {
            identity: self.identity.borrow().draws(),
            matching: self.matching.borrow().draws(),
            recommend: self.recommend.borrow().draws(),
            optional: self.optional.borrow().draws(),
            copy: self.copy.borrow().draws(),
        }
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    // HMAC accepts keys of any length, so the fallback branch is unreachable.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}
