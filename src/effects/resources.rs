//! Opaque external resources wrapped by image and runtime-effect sources.
//!
//! dlfx never looks inside these handles. Providers implement the traits for their
//! platform images and compiled shaders; sources delegate equality, opacity and
//! thread-safety questions to them.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Platform image wrapped by an image color source.
pub trait ImageHandle: Debug + Send + Sync {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Return `true` when every pixel is fully opaque.
    fn is_opaque(&self) -> bool;

    /// Return `true` when the image may be read without moving to a render thread.
    fn is_ui_thread_safe(&self) -> bool;

    /// Structural equality with another handle, usually via [`ImageHandle::as_any`].
    fn equals(&self, other: &dyn ImageHandle) -> bool;

    /// Access for downcasting in [`ImageHandle::equals`].
    fn as_any(&self) -> &dyn Any;
}

/// Compiled shader effect wrapped by a runtime-effect color source.
pub trait RuntimeEffectHandle: Debug + Send + Sync {
    /// Structural equality with another handle, usually via
    /// [`RuntimeEffectHandle::as_any`].
    fn equals(&self, other: &dyn RuntimeEffectHandle) -> bool;

    /// Access for downcasting in [`RuntimeEffectHandle::equals`].
    fn as_any(&self) -> &dyn Any;
}

pub(crate) fn images_equal(a: &Arc<dyn ImageHandle>, b: &Arc<dyn ImageHandle>) -> bool {
    Arc::ptr_eq(a, b) || a.equals(b.as_ref())
}

pub(crate) fn effects_equal(
    a: &Arc<dyn RuntimeEffectHandle>,
    b: &Arc<dyn RuntimeEffectHandle>,
) -> bool {
    Arc::ptr_eq(a, b) || a.equals(b.as_ref())
}
