#[cfg(feature = "core")]
#[doc(inline)]
pub use hkit_core as core;

#[cfg(feature = "count")]
#[doc(inline)]
pub use hkit_count as count;

#[cfg(feature = "io")]
#[doc(inline)]
pub use hkit_io as io;
