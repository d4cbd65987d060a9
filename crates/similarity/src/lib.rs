//! # Similarity Crate
//!
//! Content similarity between catalog movies.
//!
//! ## Components
//!
//! - **tokenizer**: turns a soup into lowercase terms, stop words removed
//! - **tfidf**: vocabulary, IDF weights and unit-length sparse vectors
//! - **index**: dense cosine matrix and nearest-neighbor queries
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::SimilarityIndex;
//!
//! let index = SimilarityIndex::build(&catalog);
//! let row = catalog.row_of("Alien").unwrap();
//! for neighbor in index.neighbors(row, 5) {
//!     println!("{}", catalog.get(neighbor).unwrap().title);
//! }
//! ```
//!
//! The matrix is O(N²) in memory: about 100MB of `f32` for the 4800 TMDB movies.

pub mod tokenizer;
pub mod tfidf;
pub mod index;

pub use index::{Neighbor, SimilarityIndex};
pub use tfidf::{SparseVector, TermId, TfIdfVectorizer};
pub use tokenizer::tokenize;
