//! GLaMpress compactor: motif-based transcript compression.
//!
//! Encode path: parse → motif encoding → mode selection → xz.
//! Decode path: xz → payload probe → motif reconstruction or plain text.
//!
//! Modules:
//! 1. `motif` — (sender, body) deduplication into `$P<n>$` symbols
//! 2. `selector` — motif vs plain decision from the repetition ratio
//! 3. `codec` — payload serialization and LZMA compression
//! 4. `reconstruct` — decode state machine
//! 5. `pipeline` — end-to-end encode/decode and artifact naming
//! 6. `worker` — one-shot background jobs

pub mod codec;
pub mod motif;
pub mod pipeline;
pub mod reconstruct;
pub mod selector;
pub mod worker;

pub use motif::{EncodedTranscript, MotifDictionary, MotifEncoder};
pub use pipeline::{Analysis, CompressionReport, DecodedFile, EncodedFile, GlampressPipeline};
pub use reconstruct::{DecodeState, Reconstruction, Reconstructor};
pub use selector::{CompressionMode, ModeSelector};
