//! The fixed route table.
//!
//! Routes are matched in order against the path suffix and the method (case-insensitive);
//! the first match wins. Only routes of enabled modules take part.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Module {
    User,
    Resume,
    CoverLetter,
    Assessment,
    Industry,
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::User,
        Module::Resume,
        Module::CoverLetter,
        Module::Assessment,
        Module::Industry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Module::User => "user",
            Module::Resume => "resume",
            Module::CoverLetter => "cover-letter",
            Module::Assessment => "assessment",
            Module::Industry => "industry",
        }
    }

    pub fn from_name(name: &str) -> Option<Module> {
        Module::ALL
            .into_iter()
            .find(|module| module.name().eq_ignore_ascii_case(name))
    }
}

/// What a matched request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CheckOnboarding,
    GetProfile,
    UpdateProfile,
    GetResume,
    SaveResume,
    ImproveResume,
    ListCoverLetters,
    CreateCoverLetter,
    GetCoverLetter,
    DeleteCoverLetter,
    GenerateQuiz,
    SaveQuizResult,
    QuizHistory,
    IndustryInsights,
}

#[derive(Debug, Clone, Copy)]
enum PathMatch {
    /// The path ends with this literal.
    Suffix(&'static str),
    /// The path ends with this collection prefix followed by one segment (`/x/{id}`).
    Item(&'static str),
}

impl PathMatch {
    fn matches(self, path: &str) -> bool {
        match self {
            PathMatch::Suffix(suffix) => path.ends_with(suffix),
            PathMatch::Item(collection) => path
                .rfind(collection)
                .is_some_and(|at| !path[at + collection.len()..].contains('/')),
        }
    }
}

struct Route {
    module: Module,
    method: &'static str,
    path: PathMatch,
    action: Action,
}

const fn route(module: Module, method: &'static str, path: PathMatch, action: Action) -> Route {
    Route {
        module,
        method,
        path,
        action,
    }
}

const ROUTES: &[Route] = &[
    route(Module::User, "GET", PathMatch::Suffix("/onboarding"), Action::CheckOnboarding),
    route(Module::User, "GET", PathMatch::Suffix("/profile"), Action::GetProfile),
    route(Module::User, "POST", PathMatch::Suffix("/profile"), Action::UpdateProfile),
    route(Module::Resume, "GET", PathMatch::Suffix("/resume"), Action::GetResume),
    route(Module::Resume, "POST", PathMatch::Suffix("/resume"), Action::SaveResume),
    route(Module::Resume, "POST", PathMatch::Suffix("/resume/improve"), Action::ImproveResume),
    route(Module::CoverLetter, "GET", PathMatch::Suffix("/cover-letters"), Action::ListCoverLetters),
    route(Module::CoverLetter, "POST", PathMatch::Suffix("/cover-letters"), Action::CreateCoverLetter),
    route(Module::CoverLetter, "GET", PathMatch::Item("/cover-letters/"), Action::GetCoverLetter),
    route(Module::CoverLetter, "DELETE", PathMatch::Item("/cover-letters/"), Action::DeleteCoverLetter),
    route(Module::Assessment, "POST", PathMatch::Suffix("/interview/generate"), Action::GenerateQuiz),
    route(Module::Assessment, "POST", PathMatch::Suffix("/interview/save"), Action::SaveQuizResult),
    route(Module::Assessment, "GET", PathMatch::Suffix("/interview/history"), Action::QuizHistory),
    route(Module::Industry, "GET", PathMatch::Suffix("/industry-insights"), Action::IndustryInsights),
];

/// First route of an enabled module matching `method` and `path`.
pub fn resolve(modules: &BTreeSet<Module>, method: &str, path: &str) -> Option<Action> {
    ROUTES
        .iter()
        .filter(|r| modules.contains(&r.module))
        .find(|r| r.method.eq_ignore_ascii_case(method) && r.path.matches(path))
        .map(|r| r.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> BTreeSet<Module> {
        Module::ALL.into_iter().collect()
    }

    #[test]
    fn test_suffix_matching_ignores_stage_prefix() {
        assert_eq!(resolve(&all(), "GET", "/prod/profile"), Some(Action::GetProfile));
        assert_eq!(resolve(&all(), "POST", "/profile"), Some(Action::UpdateProfile));
        assert_eq!(resolve(&all(), "GET", "/onboarding"), Some(Action::CheckOnboarding));
    }

    #[test]
    fn test_method_is_case_insensitive() {
        assert_eq!(resolve(&all(), "get", "/resume"), Some(Action::GetResume));
    }

    #[test]
    fn test_improve_is_not_confused_with_resume() {
        assert_eq!(resolve(&all(), "POST", "/resume"), Some(Action::SaveResume));
        assert_eq!(resolve(&all(), "POST", "/resume/improve"), Some(Action::ImproveResume));
        assert_eq!(resolve(&all(), "GET", "/resume/improve"), None);
    }

    #[test]
    fn test_cover_letter_collection_and_item() {
        assert_eq!(resolve(&all(), "GET", "/cover-letters"), Some(Action::ListCoverLetters));
        assert_eq!(resolve(&all(), "POST", "/cover-letters"), Some(Action::CreateCoverLetter));
        assert_eq!(resolve(&all(), "GET", "/cover-letters/abc"), Some(Action::GetCoverLetter));
        assert_eq!(
            resolve(&all(), "DELETE", "/dev/cover-letters/abc"),
            Some(Action::DeleteCoverLetter)
        );
        assert_eq!(resolve(&all(), "GET", "/cover-letters/abc/extra"), None);
        assert_eq!(resolve(&all(), "POST", "/cover-letters/abc"), None);
    }

    #[test]
    fn test_unknown_path_or_method() {
        assert_eq!(resolve(&all(), "GET", "/nonexistent"), None);
        assert_eq!(resolve(&all(), "PUT", "/profile"), None);
        assert_eq!(resolve(&all(), "UNKNOWN", "/profile"), None);
    }

    #[test]
    fn test_disabled_module_routes_do_not_match() {
        let only_resume = BTreeSet::from([Module::Resume]);
        assert_eq!(resolve(&only_resume, "GET", "/profile"), None);
        assert_eq!(resolve(&only_resume, "GET", "/resume"), Some(Action::GetResume));
    }

    #[test]
    fn test_module_names_round_trip() {
        for module in Module::ALL {
            assert_eq!(Module::from_name(module.name()), Some(module));
        }
        assert_eq!(Module::from_name("Cover-Letter"), Some(Module::CoverLetter));
        assert_eq!(Module::from_name("billing"), None);
    }
}
