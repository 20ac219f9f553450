use pinhole_core::{AllocationError, ReadRegistry, ShortCode};
use pinhole_generator::Generator;
use tracing::{debug, error, warn};

/// Number of candidates drawn before generation gives up.
pub const MAX_ATTEMPTS: u32 = 100;

/// Picks the short code for a new entry.
///
/// A custom code is the caller's chosen identity: it is validated and
/// rejected on collision, never replaced. Generated codes are
/// interchangeable, so a collision just means drawing another candidate,
/// up to `max_attempts` times.
///
/// The allocator only reads the registry. The insert that follows must
/// still be checked, since another caller may claim the same code between
/// the two.
#[derive(Debug, Clone)]
pub struct ShortcodeAllocator<G> {
    generator: G,
    max_attempts: u32,
}

impl<G: Generator> ShortcodeAllocator<G> {
    pub fn new(generator: G) -> Self {
        Self::with_max_attempts(generator, MAX_ATTEMPTS)
    }

    /// Creates an allocator with a custom attempt cap. A cap of zero is
    /// raised to one.
    pub fn with_max_attempts(generator: G, max_attempts: u32) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn into_generator(self) -> G {
        self.generator
    }

    /// Resolves the code for a new entry.
    ///
    /// With `custom_code`, returns it unchanged if it is well-formed and
    /// free. Without, returns the first generated candidate the registry
    /// does not hold.
    pub fn resolve<R: ReadRegistry + ?Sized>(
        &self,
        registry: &R,
        custom_code: Option<&str>,
    ) -> Result<ShortCode, AllocationError> {
        match custom_code {
            Some(code) => Self::claim_custom(registry, code),
            None => self.generate_unique(registry),
        }
    }

    fn claim_custom<R: ReadRegistry + ?Sized>(
        registry: &R,
        code: &str,
    ) -> Result<ShortCode, AllocationError> {
        let code = ShortCode::new(code)?;
        if registry.exists(&code) {
            warn!(code = %code, "custom short code already exists");
            return Err(AllocationError::Collision(code));
        }
        Ok(code)
    }

    fn generate_unique<R: ReadRegistry + ?Sized>(
        &self,
        registry: &R,
    ) -> Result<ShortCode, AllocationError> {
        for attempt in 1..=self.max_attempts {
            let candidate: ShortCode = self.generator.generate().into();
            if !registry.exists(&candidate) {
                debug!(code = %candidate, attempt, "generated short code");
                return Ok(candidate);
            }
            debug!(code = %candidate, attempt, "generated short code collided");
        }

        error!(
            attempts = self.max_attempts,
            "failed to generate a unique short code"
        );
        Err(AllocationError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
