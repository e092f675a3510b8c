// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! The nesting depth is selected through cargo features. Exactly one of them
//! must be enabled, since each one defines `MAX_DEPTH_LEVEL`.

#[cfg(not(any(feature = "depth-8", feature = "depth-16", feature = "depth-32")))]
compile_error!("No depth feature selected: choose one of 'depth-8', 'depth-16', or 'depth-32'");

#[cfg(all(feature = "depth-8", feature = "depth-16"))]
compile_error!(
    "Cannot enable both 'depth-8' and 'depth-16' features simultaneously: choose one nesting depth"
);

#[cfg(all(feature = "depth-8", feature = "depth-32"))]
compile_error!(
    "Cannot enable both 'depth-8' and 'depth-32' features simultaneously: choose one nesting depth"
);

#[cfg(all(feature = "depth-16", feature = "depth-32"))]
compile_error!(
    "Cannot enable both 'depth-16' and 'depth-32' features simultaneously: choose one nesting depth"
);
