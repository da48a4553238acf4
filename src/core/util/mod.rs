// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod identifier;

pub use identifier::{to_class_name, to_method_name};
