// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub use tracing::{debug, instrument, trace, warn};

// The no-op macros get their own names and are re-exported under the
// `tracing` ones: a `use` of a bare `warn` would be ambiguous with the
// built-in `#[warn]` attribute.
#[cfg(not(feature = "tracing"))]
macro_rules! no_op_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! no_op_trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! no_op_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use {no_op_debug as debug, no_op_trace as trace, no_op_warn as warn};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_accept_tracing_syntax() {
        let value = 3;
        let name = "x";
        debug!(value, "debug message");
        trace!(?name, value, "trace message");
        warn!(padding_bits = value, "warn message {}", name);
        debug!(?value);
        let _ = (value, name);
    }
}
