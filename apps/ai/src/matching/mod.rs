// Candidate ↔ job matching: embeddings of the job description, the candidate profile
// and individual skills, ranked by cosine similarity.
// All provider calls go through the EmbeddingClient seam.

pub mod embedding;
pub mod engine;
pub mod handlers;
pub mod profile;
pub mod vector_math;
