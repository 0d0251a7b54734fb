//! Career archetypes - the fixed candidate career paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five candidate career paths, in declaration order.
///
/// Declaration order is also the tie-break order of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerArchetype {
    Frontend,
    Backend,
    Security,
    DevOps,
    Data,
}

/// Static presentation content for an archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
    pub title: &'static str,
    pub description: &'static str,
    pub required_skills: &'static [&'static str],
    pub growth_areas: &'static [&'static str],
}

impl CareerArchetype {
    /// All archetypes in declaration order.
    pub const ALL: [CareerArchetype; 5] = [
        CareerArchetype::Frontend,
        CareerArchetype::Backend,
        CareerArchetype::Security,
        CareerArchetype::DevOps,
        CareerArchetype::Data,
    ];

    /// Trait weights for this archetype. Each vector sums to 1.0.
    pub fn weights(&self) -> &'static [(&'static str, f64)] {
        match self {
            CareerArchetype::Frontend => &[
                ("creativity", 0.35),
                ("technical", 0.25),
                ("communication", 0.20),
                ("teamwork", 0.20),
            ],
            CareerArchetype::Backend => &[
                ("technical", 0.40),
                ("analysis", 0.30),
                ("teamwork", 0.20),
                ("communication", 0.10),
            ],
            CareerArchetype::Security => &[
                ("analysis", 0.40),
                ("technical", 0.35),
                ("teamwork", 0.15),
                ("communication", 0.10),
            ],
            CareerArchetype::DevOps => &[
                ("technical", 0.35),
                ("analysis", 0.30),
                ("teamwork", 0.20),
                ("communication", 0.15),
            ],
            CareerArchetype::Data => &[
                ("analysis", 0.45),
                ("technical", 0.25),
                ("creativity", 0.20),
                ("communication", 0.10),
            ],
        }
    }

    /// Title, description and skill lists shown to the user.
    pub fn profile(&self) -> ArchetypeProfile {
        match self {
            CareerArchetype::Frontend => ArchetypeProfile {
                title: "Frontend Developer",
                description: "Designs and builds user interfaces and interactions, \
                    specialising in the visual and experiential side of web products.",
                required_skills: &["HTML/CSS", "JavaScript", "React", "UI/UX Design", "Responsive Design"],
                growth_areas: &["Backend Integration", "Performance Optimization", "Accessibility"],
            },
            CareerArchetype::Backend => ArchetypeProfile {
                title: "Backend Developer",
                description: "Builds the server-side logic, database interactions and APIs \
                    that run behind web applications.",
                required_skills: &["Node.js", "Databases", "API Design", "Server Management", "Security"],
                growth_areas: &["Scaling", "Microservices", "Cloud Platforms"],
            },
            CareerArchetype::Security => ArchetypeProfile {
                title: "Security Specialist",
                description: "Protects systems and applications by finding and preventing \
                    security vulnerabilities.",
                required_skills: &["Network Security", "Penetration Testing", "Security Tooling", "Risk Analysis"],
                growth_areas: &["Cloud Security", "Malware Analysis", "Security Automation"],
            },
            CareerArchetype::DevOps => ArchetypeProfile {
                title: "DevOps Engineer",
                description: "Automates software delivery and operations, building continuous \
                    integration and deployment pipelines.",
                required_skills: &["Linux", "Docker", "CI/CD", "Cloud Platforms", "Automation"],
                growth_areas: &["Kubernetes", "Security Automation", "SRE Practices"],
            },
            CareerArchetype::Data => ArchetypeProfile {
                title: "Data Scientist",
                description: "Analyses large data sets, builds machine learning models and \
                    turns data into insight.",
                required_skills: &["Python", "Machine Learning", "Statistics", "Data Analysis", "SQL"],
                growth_areas: &["Deep Learning", "Big Data Technologies", "Data Visualization"],
            },
        }
    }
}

impl fmt::Display for CareerArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().title)
    }
}
