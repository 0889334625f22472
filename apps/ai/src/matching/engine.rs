//! Match Engine: semantic match between a job description and a candidate resume.
//!
//! Flow: validate → candidate text → job + candidate embeddings → overall score →
//!       per-skill embeddings (first 20 skills, failed calls dropped) → rank → explanation.
//!
//! Stateless: every call computes from scratch. The only shared piece is the
//! embedding client handed in at construction.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::matching::embedding::EmbeddingClient;
use crate::matching::profile::build_candidate_profile;
use crate::matching::vector_math::{
    cosine_similarity, normalize_to_relevance, normalize_to_score, round_to,
};
use crate::models::resume::ResumeProfile;

/// Skills past this many are ignored entirely. Caps embedding fan-out per request.
pub const MAX_SKILLS_EMBEDDED: usize = 20;
/// Number of skills reported in `top_skills`.
pub const TOP_SKILLS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScore {
    pub skill: String,
    pub relevance: f64, // 0.0 – 1.0, 3 decimals
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_score: f64,           // 0 – 100, 2 decimals
    pub top_skills: Vec<SkillScore>, // ≤ 3, relevance descending
    pub explanation: String,
}

/// One entry of the fan-out accumulator: the skill and what its embedding call returned.
struct SkillOutcome {
    skill: String,
    outcome: Result<f64, LlmError>,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MatchEngine {
    embedder: Arc<dyn EmbeddingClient>,
}

impl MatchEngine {
    pub fn new(embedder: Arc<dyn EmbeddingClient>) -> Self {
        Self { embedder }
    }

    /// Scores `profile` against `job_description`.
    ///
    /// Validation happens before any embedding call. Job and candidate embedding
    /// failures abort the match, as does any dimension mismatch. A failed skill
    /// embedding call only drops that skill.
    pub async fn match_resume(
        &self,
        job_description: &str,
        profile: &ResumeProfile,
    ) -> Result<MatchResult, AppError> {
        if job_description.trim().is_empty() {
            return Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            ));
        }
        let candidate_text = build_candidate_profile(profile)?;

        let (job_embedding, candidate_embedding) = tokio::try_join!(
            self.embed_required("job description", job_description),
            self.embed_required("candidate profile", &candidate_text),
        )?;

        let similarity = cosine_similarity(&job_embedding, &candidate_embedding)
            .map_err(|e| AppError::Upstream(format!("Cannot compare embeddings: {e}")))?;
        let match_score = round_to(normalize_to_score(similarity), 2);

        let outcomes = self.score_skills(&job_embedding, &profile.skills).await?;
        let top_skills = rank_skills(outcomes);
        let explanation = build_explanation(match_score, &top_skills);

        info!(
            match_score,
            top_skills = top_skills.len(),
            "Match computed"
        );

        Ok(MatchResult {
            match_score,
            top_skills,
            explanation,
        })
    }

    async fn embed_required(&self, what: &str, text: &str) -> Result<Vec<f32>, AppError> {
        self.embedder
            .embed(text)
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to embed {what}: {e}")))
    }

    /// Embeds the first `MAX_SKILLS_EMBEDDED` skills concurrently.
    /// Output order equals input order, which the stable ranking relies on.
    ///
    /// A failed embedding call only marks that skill as failed. A vector that
    /// cannot be compared with the job embedding fails the whole match.
    async fn score_skills(
        &self,
        job_embedding: &[f32],
        skills: &[String],
    ) -> Result<Vec<SkillOutcome>, AppError> {
        let tasks = skills
            .iter()
            .take(MAX_SKILLS_EMBEDDED)
            .map(|skill| async move { (skill, self.embedder.embed(skill).await) });

        futures::future::join_all(tasks)
            .await
            .into_iter()
            .map(|(skill, embedded)| -> Result<SkillOutcome, AppError> {
                let outcome = match embedded {
                    Ok(vector) => {
                        let similarity = cosine_similarity(job_embedding, &vector).map_err(|e| {
                            AppError::Upstream(format!("Cannot compare skill '{skill}': {e}"))
                        })?;
                        Ok(similarity)
                    }
                    Err(e) => Err(e),
                };
                Ok(SkillOutcome {
                    skill: skill.clone(),
                    outcome,
                })
            })
            .collect()
    }
}

/// Keeps successful skills, sorts by relevance descending (stable), takes the top few.
fn rank_skills(outcomes: Vec<SkillOutcome>) -> Vec<SkillScore> {
    let mut scored: Vec<SkillScore> = outcomes
        .into_iter()
        .filter_map(|SkillOutcome { skill, outcome }| match outcome {
            Ok(similarity) => Some(SkillScore {
                skill,
                relevance: round_to(normalize_to_relevance(similarity), 3),
            }),
            Err(e) => {
                debug!(skill = %skill, error = %e, "Skipping skill");
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
    scored.truncate(TOP_SKILLS);
    scored
}

fn build_explanation(match_score: f64, top_skills: &[SkillScore]) -> String {
    let lead = if top_skills.is_empty() {
        "Match based on overall profile similarity. ".to_string()
    } else {
        let names: Vec<&str> = top_skills.iter().map(|s| s.skill.as_str()).collect();
        format!("Top matched skills: {}. ", names.join(", "))
    };

    format!(
        "{lead}Overall match score: {match_score:.1}/100 based on semantic similarity \
         between job requirements and candidate profile."
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::embedding::testing::ScriptedEmbedder;
    use crate::models::resume::Experience;

    const JD: &str = "Senior backend engineer with Go and distributed systems experience";

    fn skills(names: &[&str]) -> ResumeProfile {
        ResumeProfile {
            skills: names.iter().map(|s| s.to_string()).collect(),
            ..ResumeProfile::default()
        }
    }

    fn engine(embedder: &Arc<ScriptedEmbedder>) -> MatchEngine {
        MatchEngine::new(embedder.clone())
    }

    #[tokio::test]
    async fn test_end_to_end_ranks_related_skills_first() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with(JD, vec![1.0, 0.0, 0.0])
                .with(
                    "Skills: Go, Python, Distributed Systems",
                    vec![0.8, 0.6, 0.0],
                )
                .with("Go", vec![0.9, 0.1, 0.0])
                .with("Python", vec![0.0, 0.2, 1.0])
                .with("Distributed Systems", vec![0.7, 0.3, 0.1]),
        );

        let result = engine(&embedder)
            .match_resume(JD, &skills(&["Go", "Python", "Distributed Systems"]))
            .await
            .unwrap();

        let names: Vec<&str> = result.top_skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, vec!["Go", "Distributed Systems", "Python"]);
        assert!((0.0..=100.0).contains(&result.match_score));
        // similarity 0.8 → (0.8 + 1) * 50
        assert_eq!(result.match_score, 90.0);
        assert!(result
            .explanation
            .starts_with("Top matched skills: Go, Distributed Systems, Python. "));
        assert!(result.explanation.contains("Overall match score: 90.0/100"));
        assert_eq!(embedder.calls(), 5);
    }

    #[tokio::test]
    async fn test_failed_skill_is_silently_dropped() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with_fallback(vec![1.0, 0.0])
                .failing_on("B"),
        );

        let result = engine(&embedder)
            .match_resume(JD, &skills(&["A", "B", "C"]))
            .await
            .unwrap();

        let names: Vec<&str> = result.top_skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(embedder.calls(), 5);
    }

    #[tokio::test]
    async fn test_never_more_than_twenty_skill_calls() {
        let names: Vec<String> = (0..30).map(|i| format!("skill-{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let embedder = Arc::new(ScriptedEmbedder::new().with_fallback(vec![0.5, 0.5]));

        engine(&embedder)
            .match_resume(JD, &skills(&refs))
            .await
            .unwrap();

        // job + candidate + 20 skills
        assert_eq!(embedder.calls(), 2 + MAX_SKILLS_EMBEDDED);
        let seen = embedder.seen();
        assert!(seen.contains(&"skill-19".to_string()));
        assert!(!seen.contains(&"skill-20".to_string()));
        assert!(!seen.contains(&"skill-29".to_string()));
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let embedder = Arc::new(ScriptedEmbedder::new().with_fallback(vec![1.0, 1.0]));

        let result = engine(&embedder)
            .match_resume(JD, &skills(&["D", "A", "C", "B"]))
            .await
            .unwrap();

        let names: Vec<&str> = result.top_skills.iter().map(|s| s.skill.as_str()).collect();
        assert_eq!(names, vec!["D", "A", "C"]);
        assert!(result.top_skills.iter().all(|s| s.relevance == 1.0));
    }

    #[tokio::test]
    async fn test_empty_job_description_makes_no_calls() {
        let embedder = Arc::new(ScriptedEmbedder::new().with_fallback(vec![1.0]));

        for jd in ["", "   \n\t"] {
            let err = engine(&embedder)
                .match_resume(jd, &skills(&["Go"]))
                .await
                .unwrap_err();
            match err {
                AppError::Validation(msg) => assert!(msg.contains("job_description")),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_profile_makes_no_calls() {
        let embedder = Arc::new(ScriptedEmbedder::new().with_fallback(vec![1.0]));

        let err = engine(&embedder)
            .match_resume(JD, &ResumeProfile::default())
            .await
            .unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.contains("candidate_resume_parsed_json")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(embedder.calls(), 0);
    }

    #[tokio::test]
    async fn test_job_embedding_failure_is_fatal() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with_fallback(vec![1.0, 0.0])
                .failing_on(JD),
        );

        let err = engine(&embedder)
            .match_resume(JD, &skills(&["Go"]))
            .await
            .unwrap_err();

        match err {
            AppError::Upstream(msg) => {
                assert!(msg.contains("job description"));
                assert!(msg.contains("scripted failure"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_candidate_embedding_failure_is_fatal() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with_fallback(vec![1.0, 0.0])
                .failing_on("Skills: Go"),
        );

        let err = engine(&embedder)
            .match_resume(JD, &skills(&["Go"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_upstream_error() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with(JD, vec![1.0, 0.0, 0.0])
                .with("Skills: Go", vec![1.0, 0.0]),
        );

        let err = engine(&embedder)
            .match_resume(JD, &skills(&["Go"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_skill_with_wrong_dimension_fails_match() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with_fallback(vec![1.0, 0.0])
                .with("Go", vec![1.0, 0.0, 0.0]),
        );

        let err = engine(&embedder)
            .match_resume(JD, &skills(&["Go", "SQL"]))
            .await
            .unwrap_err();

        match err {
            AppError::Upstream(msg) => {
                assert!(msg.contains("'Go'"));
                assert!(msg.contains("dimension mismatch"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_skill_call_next_to_wrong_dimension_still_fails_match() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with_fallback(vec![1.0, 0.0])
                .failing_on("Rust")
                .with("SQL", vec![1.0]),
        );

        let err = engine(&embedder)
            .match_resume(JD, &skills(&["Rust", "SQL"]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_no_skills_uses_profile_explanation() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with(JD, vec![1.0, 0.0])
                .with("Experience: Backend Engineer at Acme", vec![1.0, 1.0]),
        );
        let profile = ResumeProfile {
            experiences: vec![Experience {
                company: "Acme".to_string(),
                title: "Backend Engineer".to_string(),
                ..Experience::default()
            }],
            ..ResumeProfile::default()
        };

        let result = engine(&embedder).match_resume(JD, &profile).await.unwrap();

        assert!(result.top_skills.is_empty());
        // cos 45° = 0.70710678 → 85.355… → 85.36
        assert_eq!(result.match_score, 85.36);
        assert_eq!(
            result.explanation,
            "Match based on overall profile similarity. Overall match score: 85.4/100 \
             based on semantic similarity between job requirements and candidate profile."
        );
        assert_eq!(embedder.calls(), 2);
    }

    #[tokio::test]
    async fn test_all_skills_failing_still_matches() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with_fallback(vec![0.0, 1.0])
                .failing_on("Go")
                .failing_on("Rust"),
        );

        let result = engine(&embedder)
            .match_resume(JD, &skills(&["Go", "Rust"]))
            .await
            .unwrap();

        assert!(result.top_skills.is_empty());
        assert!(result
            .explanation
            .starts_with("Match based on overall profile similarity."));
    }

    #[tokio::test]
    async fn test_scores_clamped_for_opposite_vectors() {
        let embedder = Arc::new(
            ScriptedEmbedder::new()
                .with(JD, vec![1.0, 0.0])
                .with_fallback(vec![-1.0, 0.0]),
        );

        let result = engine(&embedder)
            .match_resume(JD, &skills(&["COBOL"]))
            .await
            .unwrap();

        assert_eq!(result.match_score, 0.0);
        assert_eq!(result.top_skills[0].relevance, 0.0);
    }

    #[test]
    fn test_rank_skills_rounds_and_truncates() {
        let outcomes = vec![
            SkillOutcome {
                skill: "a".to_string(),
                outcome: Ok(0.1),
            },
            SkillOutcome {
                skill: "b".to_string(),
                outcome: Ok(0.9),
            },
            SkillOutcome {
                skill: "c".to_string(),
                outcome: Err(LlmError::EmptyContent),
            },
            SkillOutcome {
                skill: "d".to_string(),
                outcome: Ok(0.2468),
            },
            SkillOutcome {
                skill: "e".to_string(),
                outcome: Ok(-0.5),
            },
        ];

        let ranked = rank_skills(outcomes);
        assert_eq!(
            ranked,
            vec![
                SkillScore {
                    skill: "b".to_string(),
                    relevance: 0.95
                },
                SkillScore {
                    skill: "d".to_string(),
                    relevance: 0.623
                },
                SkillScore {
                    skill: "a".to_string(),
                    relevance: 0.55
                },
            ]
        );
    }

    #[test]
    fn test_match_result_json_shape() {
        let result = MatchResult {
            match_score: 72.5,
            top_skills: vec![SkillScore {
                skill: "Go".to_string(),
                relevance: 0.9,
            }],
            explanation: "x".to_string(),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["match_score"], 72.5);
        assert_eq!(value["top_skills"][0]["skill"], "Go");
        assert_eq!(value["top_skills"][0]["relevance"], 0.9);
        assert_eq!(value["explanation"], "x");
    }
}
