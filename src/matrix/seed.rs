use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, Read},
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use log::{debug, warn};
use rand::{
    RngCore, SeedableRng, TryRngCore,
    rngs::{OsRng, StdRng},
};

use crate::{MlErr, Result};

/// Device files holding random bytes, in the order they are tried.
const ENTROPY_DEVICES: [&str; 3] = ["/dev/urandom", "/dev/arandom", "/dev/random"];

/// A `SeedSource` provides the seeds random matrices are generated from.
pub trait SeedSource {
    /// Returns a new seed.
    ///
    /// # Returns
    /// The seed or an error if the source is exhausted.
    fn seed(&mut self) -> Result<u64>;
}

/// A deterministic sequence of seeds derived from a single `u64`.
pub struct FixedSeed {
    rng: StdRng,
}

impl FixedSeed {
    /// Creates a new `FixedSeed`, equal `seed`s always yield the same sequence.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SeedSource for FixedSeed {
    fn seed(&mut self) -> Result<u64> {
        Ok(self.rng.next_u64())
    }
}

/// A single place entropy can be read from.
#[derive(Debug, Clone, PartialEq)]
pub enum Entropy {
    /// The platform's CSPRNG.
    Os,
    /// A device file, the first 8 bytes read are used as the seed.
    Device(PathBuf),
}

impl Entropy {
    fn read(&self) -> io::Result<u64> {
        match self {
            Entropy::Os => OsRng
                .try_next_u64()
                .map_err(|e| io::Error::other(e.to_string())),
            Entropy::Device(path) => {
                let mut buf = [0; 8];
                File::open(path)?.read_exact(&mut buf)?;
                Ok(u64::from_ne_bytes(buf))
            }
        }
    }
}

impl Display for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entropy::Os => write!(f, "os rng"),
            Entropy::Device(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Seeds taken from the operating system.
///
/// The sources are tried in order until one of them yields a seed. When every source fails
/// the seed request fails too, unless the clock fallback is enabled, in which case the
/// current time is used and a warning is logged.
pub struct OsEntropy {
    sources: Vec<Entropy>,
    clock_fallback: bool,
}

impl OsEntropy {
    /// Creates a new `OsEntropy` trying the platform's CSPRNG first and then the usual
    /// random device files.
    pub fn new() -> Self {
        let devices = ENTROPY_DEVICES
            .into_iter()
            .map(|path| Entropy::Device(PathBuf::from(path)));

        Self::with_sources([Entropy::Os].into_iter().chain(devices))
    }

    /// Creates a new `OsEntropy` trying only the given `sources`, in order.
    pub fn with_sources<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Entropy>,
    {
        Self {
            sources: sources.into_iter().collect(),
            clock_fallback: false,
        }
    }

    /// Sets whether the system clock may be used once every source failed.
    pub fn clock_fallback(mut self, enabled: bool) -> Self {
        self.clock_fallback = enabled;
        self
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
    }
}

impl Default for OsEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedSource for OsEntropy {
    fn seed(&mut self) -> Result<u64> {
        for source in &self.sources {
            match source.read() {
                Ok(seed) => return Ok(seed),
                Err(e) => debug!("entropy source {source} unavailable: {e}"),
            }
        }

        if !self.clock_fallback {
            return Err(MlErr::EntropyUnavailable);
        }

        warn!("no entropy source available, falling back to a weak clock based seed");
        Ok(Self::clock_seed())
    }
}
