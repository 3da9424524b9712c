use std::{collections::HashSet, fs::File, io, path::Path};

use anyhow::{bail, Context};

pub const ADMIN_ROSTER: &str = "Admin.csv";
pub const STAFF_ROSTER: &str = "Staff_table_filled.csv";

/// Lower-cased names of everyone allowed to sign up with a non-patient role,
/// snapshotted from the admin and staff CSV files at start-up.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    names: HashSet<String>,
}

impl Roster {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Load both roster files from `dir`. A missing file contributes nobody.
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let mut names = Vec::new();
        for file_name in [ADMIN_ROSTER, STAFF_ROSTER].iter() {
            let path = dir.join(file_name);
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!("Roster {} not found", path.display());
                    continue;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("Failed to open {}", path.display()))
                }
            };
            let loaded = read_names(file).with_context(|| format!("Bad roster {}", path.display()))?;
            tracing::info!("Loaded {} names from {}", loaded.len(), path.display());
            names.extend(loaded);
        }
        Ok(Self::from_names(names))
    }

    pub fn contains(&self, username: &str) -> bool {
        self.names.contains(&username.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Values of the column whose header is `name`, in any case.
pub fn read_names<R: io::Read>(source: R) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let column = match reader
        .headers()
        .context("Missing header row")?
        .iter()
        .position(|header| header.eq_ignore_ascii_case("name"))
    {
        Some(column) => column,
        None => bail!("No name column"),
    };

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.context("Malformed CSV")?;
        if let Some(name) = record.get(column) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn matches_case_insensitively() {
        let roster = Roster::from_names(vec!["Alice Smith", "BOB"]);
        assert!(roster.contains("alice smith"));
        assert!(roster.contains("ALICE SMITH"));
        assert!(roster.contains("bob"));
        assert!(!roster.contains("alice"));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn reads_name_column_by_header() {
        let names = read_names("ADMIN_ID,Name,DESIGNATION\n1,Carol,Director\n2,Dave,Manager\n".as_bytes())
            .unwrap();
        assert_eq!(names, vec!["Carol".to_string(), "Dave".to_string()]);

        let names = read_names("STAFF_ID,NAME,DESIGNATION,DEPT_ID\n3,Erin,Nurse,1\n".as_bytes())
            .unwrap();
        assert_eq!(names, vec!["Erin".to_string()]);
    }

    #[test]
    fn rejects_file_without_name_column() {
        assert!(read_names("ID,TITLE\n1,x\n".as_bytes()).is_err());
    }

    #[test]
    fn load_merges_admins_and_staff() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ADMIN_ROSTER), "ADMIN_ID,Name,DESIGNATION\n1,Carol,Director\n")
            .unwrap();
        fs::write(
            dir.path().join(STAFF_ROSTER),
            "STAFF_ID,NAME,DESIGNATION,DEPT_ID\n3,Erin,Nurse,1\n",
        )
        .unwrap();

        let roster = Roster::load(dir.path()).unwrap();
        assert!(roster.contains("carol"));
        assert!(roster.contains("erin"));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn load_without_files_is_empty() {
        let dir = TempDir::new().unwrap();
        let roster = Roster::load(dir.path()).unwrap();
        assert!(roster.is_empty());
    }
}
