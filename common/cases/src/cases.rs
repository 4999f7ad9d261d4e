use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::{Error, Rule, RuleSet, TestCase, TestCaseSet, COMMON_KEY};

#[derive(Debug, Deserialize)]
struct TestCaseDef {
    #[serde(default)]
    ignored: bool,
    patterns: IndexMap<String, Rule>,
}

impl TestCaseSet {
    /// Location of the test case list under the repository root.
    pub fn path<P>(root: P) -> PathBuf
    where
        P: AsRef<Path>,
    {
        return root
            .as_ref()
            .join("tests")
            .join("asm_check")
            .join("test_cases.yaml");
    }

    pub fn load<P>(root: P) -> Result<TestCaseSet, Error>
    where
        P: AsRef<Path>,
    {
        let path = Self::path(root);
        debug!(path = %path.display(), "loading test cases");
        let content = fs::read_to_string(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        return Self::parse(&content);
    }

    pub fn parse(content: &str) -> Result<TestCaseSet, Error> {
        let mut entries: IndexMap<String, Value> =
            serde_yaml::from_str(content).map_err(Error::Malformed)?;
        let common = entries.shift_remove(COMMON_KEY).ok_or(Error::MissingCommon)?;
        let common: IndexMap<String, Rule> =
            serde_yaml::from_value(common).map_err(|source| Error::Case {
                case: String::from(COMMON_KEY),
                source,
            })?;
        let common = RuleSet::compile(COMMON_KEY, common)?;

        let cases = entries
            .into_iter()
            .map(|(id, value)| -> Result<TestCase, Error> {
                let def: TestCaseDef = serde_yaml::from_value(value).map_err(|source| {
                    Error::Case {
                        case: id.clone(),
                        source,
                    }
                })?;
                let patterns = RuleSet::compile(&id, def.patterns)?;
                return Ok(TestCase {
                    id,
                    ignored: def.ignored,
                    patterns,
                });
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            cases = cases.len(),
            common_rules = common.len(),
            "loaded test cases"
        );
        return Ok(TestCaseSet { common, cases });
    }

    /// Number of declared cases, `common` excluded.
    pub fn len(&self) -> usize {
        return self.cases.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.cases.is_empty();
    }
}
