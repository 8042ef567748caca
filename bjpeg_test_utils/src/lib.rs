// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Helpers shared by tests and benches: an approximate slice comparison and
//! a builder for small synthetic baseline streams.

mod stream;

pub use stream::*;

#[macro_export]
macro_rules! assert_all_almost_eq {
    ($left:expr, $right:expr, $max_error:expr $(,)?) => {
        let (left_val, right_val) = (&$left, &$right);
        assert_eq!(left_val.len(), right_val.len(), "length mismatch");
        for index in 0..left_val.len() {
            let (l, r) = (left_val[index], right_val[index]);
            let diff = if l > r { l - r } else { r - l };
            if !(diff <= $max_error) {
                panic!(
                    "assertion failed: `(left ≈ right)` at index {}\n  left: `{:?}`,\n right: `{:?}`,\n max_error: `{:?}`",
                    index, l, r, $max_error
                );
            }
        }
    };
}
