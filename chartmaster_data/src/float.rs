// Copyright 2025 the ChartMaster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::sqrt` is not available in `core`, so statistics dispatch through this trait
//! when the `std` feature is off.

pub(crate) trait FloatExt {
    fn sqrt(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("chartmaster_data requires either the `std` or `libm` feature");
