#![cfg_attr(not(feature = "std"), no_std)]

//! SHA-256 and SHA3-256 computed by explicit state machines that do one
//! round of work per [`Engine::step`].
//!
//! Both engines take pre-padded blocks (see [`pad`]) and share the same
//! start/ready/digest handshake, so a caller can drive either one
//! round by round or let `submit` run the block to completion.

// to prevent broken links when building documentation in #![no_std] mode
#[cfg(all(not(feature = "std"), doc))]
extern crate std;

pub mod engine;
pub mod keccak;
pub mod pad;
pub mod sha2;

#[doc(inline)]
pub use crate::engine::{Digest, Engine, EngineError, Mode, DIGEST_LEN};

#[doc(inline)]
pub use crate::keccak::sha3::{sha3_256, Sha3Block, Sha3Engine};

#[doc(inline)]
pub use crate::sha2::{sha256, Sha256Block, Sha256Engine};
