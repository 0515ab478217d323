use rand::RngCore;

use crate::{filters::FilterId, frame::PixelBuffer};

/// Core trait that every whole-frame filter implements
///
/// Implemented by the five built-in filters only; [`FilterId::filter`] hands out the one
/// implementation behind each id.
///
/// Filters are stateless. The only randomness they use is cosmetic (film grain, glitch rows)
/// and comes from the generator the caller hands in, so a seeded generator reproduces the
/// exact same output.
pub trait Filter: Send + Sync {
    /// Identifier of this filter
    fn id(&self) -> FilterId;

    /// Transform the frame in place
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame to modify in-place
    /// * `rng` - Source for the filter's cosmetic randomness
    fn apply(&self, frame: &mut PixelBuffer, rng: &mut dyn RngCore);

    /// Short machine name, same as the catalog key
    fn name(&self) -> &'static str {
        self.id().as_str()
    }
}
