//! Static project catalog.

/// One portfolio project entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub stack: String,
    pub desc: String,
    pub repo: String,
}

impl Project {
    fn new(name: &str, stack: &str, desc: &str, repo: &str) -> Self {
        Self {
            name: name.to_string(),
            stack: stack.to_string(),
            desc: desc.to_string(),
            repo: repo.to_string(),
        }
    }
}

/// Ordered, read-only project list.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// First project, in catalog order, whose lower-cased name contains
    /// `query`.
    pub fn find(&self, query: &str) -> Option<&Project> {
        let query = query.to_lowercase();
        self.projects
            .iter()
            .find(|project| project.name.to_lowercase().contains(&query))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        const REPO_BASE: &str = "https://github.com/SaiTejaBandamidi";
        let coursework = format!("{REPO_BASE}/SoftwareDevelopmentMethodologies");
        Self::new(vec![
            Project::new(
                "Go GraphQL API (Harry Potter Demo)",
                "Go • GraphQL • SQLC • Postgres • Tracing",
                "gqlgen + SQLC + Postgres with optimized resolvers and tracing.",
                &format!("{REPO_BASE}/go-graphql-sqlc-api"),
            ),
            Project::new(
                "Personal Portfolio Website Jarvis-Inspired",
                "Go • HTML • CSS • JavaScript",
                "An interactive AI-powered portfolio website styled after Iron Man's JARVIS HUD.",
                &format!("{REPO_BASE}/my-portfolio"),
            ),
            Project::new(
                "CashCard Application",
                "Python • Flask • HTML • CSS",
                "A web app for managing cash cards and wallets with user accounts, balances, and transactions.",
                &format!("{REPO_BASE}/CashCardApplication"),
            ),
            Project::new(
                "Software Development Methodologies",
                "Python • Jupyter Notebook • Markdown",
                "A collection of coding exercises exploring different software development methodologies and coding practices.",
                &coursework,
            ),
            Project::new(
                "Algorithm Implementations",
                "Python • Jupyter Notebook",
                "Notebook-based projects implementing algorithms as part of coursework.",
                &coursework,
            ),
            Project::new(
                "Programming and Problem Solving in Python",
                "Python • Software Development",
                "Programming exercises demonstrating problem-solving and coding best practices.",
                &coursework,
            ),
            Project::new(
                "Projects - WebScraping and File Processing in Python",
                "Python • File Processing • Algorithms",
                "Standalone Python scripts working with sequences and algorithms, showcasing coding fundamentals.",
                &coursework,
            ),
        ])
    }
}
