use std::{collections::{HashMap, HashSet}, fs::{self, create_dir_all, read_dir, read_to_string}, io, path::{Path, PathBuf}};

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::data::{Thought, User};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed document {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("document {} holds id '{id}'", .path.display())]
    Mismatch { path: PathBuf, id: String },
    #[error("document store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait Document: Clone + Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn key(&self) -> &str;
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn key(&self) -> &str {
        &self.id.0
    }
}

impl Document for Thought {
    const COLLECTION: &'static str = "thoughts";

    fn key(&self) -> &str {
        &self.id.0
    }
}

/// Builds a 24 character id: 8 hex digits of unix time followed by 16 random
/// alphanumerics, so ids sort roughly by creation time.
pub fn gen_id() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    format!("{:08x}{}", Utc::now().timestamp() as u32, random)
}

/// A typed set of documents, optionally written through to one JSON file per
/// document under `<root>/<collection>/`. The creation order of the ids is
/// kept in `<root>/<collection>.order.json`.
pub struct Collection<D: Document> {
    docs: HashMap<String, D>,
    order: Vec<String>,
    dir: Option<PathBuf>,
}

impl<D: Document> Collection<D> {
    pub fn in_memory() -> Self {
        Self {
            docs: HashMap::new(),
            order: vec![],
            dir: None,
        }
    }

    pub fn open(root: &Path) -> StoreResult<Self> {
        let dir = root.join(D::COLLECTION);
        create_dir_all(&dir).map_err(|source| StoreError::Io { path: dir.clone(), source })?;
        let entries = read_dir(&dir).map_err(|source| StoreError::Io { path: dir.clone(), source })?;

        let mut docs = HashMap::new();
        for entry in entries {
            let path = entry.map_err(|source| StoreError::Io { path: dir.clone(), source })?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            let text = read_to_string(&path).map_err(|source| StoreError::Io { path: path.clone(), source })?;
            let doc: D = serde_json::from_str(&text).map_err(|source| StoreError::Json { path: path.clone(), source })?;
            if path.file_stem().map_or(true, |stem| stem != doc.key()) {
                return Err(StoreError::Mismatch { id: doc.key().to_string(), path });
            }
            docs.insert(doc.key().to_string(), doc);
        }

        let mut seen = HashSet::new();
        let mut order = read_index(&index_path(&dir))?
            .into_iter()
            .filter(|id| docs.contains_key(id) && seen.insert(id.clone()))
            .collect::<Vec<_>>();
        let mut unindexed = docs.keys().filter(|id| !seen.contains(*id)).cloned().collect::<Vec<_>>();
        unindexed.sort();
        if !unindexed.is_empty() {
            log::warn!("{} {} missing from the order index", unindexed.len(), D::COLLECTION);
        }
        order.extend(unindexed);
        log::info!("loaded {} {} from {}", order.len(), D::COLLECTION, dir.display());

        Ok(Self {
            docs,
            order,
            dir: Some(dir),
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn gen_id(&self) -> String {
        loop {
            let id = gen_id();
            if !self.docs.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn all(&self) -> Vec<&D> {
        self.order.iter().filter_map(|id| self.docs.get(id)).collect()
    }

    pub fn find<F>(&self, filter: F) -> Vec<&D>
    where
        F: Fn(&D) -> bool,
    {
        self.all().into_iter().filter(|d| filter(*d)).collect()
    }

    pub fn find_one<F>(&self, filter: F) -> Option<&D>
    where
        F: Fn(&D) -> bool,
    {
        self.order.iter().filter_map(|id| self.docs.get(id)).find(|d| filter(*d))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&D> {
        self.docs.get(id)
    }

    pub fn insert(&mut self, doc: D) -> StoreResult<&D> {
        let key = doc.key().to_string();
        self.write(&doc)?;
        if self.docs.insert(key.clone(), doc).is_none() {
            self.order.push(key.clone());
            self.write_index()?;
        }
        Ok(&self.docs[&key])
    }

    pub fn save(&mut self, doc: D) -> StoreResult<&D> {
        self.insert(doc)
    }

    /// Applies `update` to the first document matching `filter`. Returns the
    /// updated document, or `None` when nothing matched.
    pub fn find_one_and_update<F, U>(&mut self, filter: F, update: U) -> StoreResult<Option<&D>>
    where
        F: Fn(&D) -> bool,
        U: FnOnce(&mut D),
    {
        let Some(key) = self.find_one(filter).map(|d| d.key().to_string()) else {
            return Ok(None);
        };
        self.find_by_id_and_update(&key, update)
    }

    pub fn find_by_id_and_update<U>(&mut self, id: &str, update: U) -> StoreResult<Option<&D>>
    where
        U: FnOnce(&mut D),
    {
        let Some(current) = self.docs.get(id) else {
            return Ok(None);
        };
        let mut updated = current.clone();
        update(&mut updated);
        self.write(&updated)?;
        self.docs.insert(id.to_string(), updated);
        Ok(self.docs.get(id))
    }

    pub fn find_by_id_and_delete(&mut self, id: &str) -> StoreResult<Option<D>> {
        if !self.docs.contains_key(id) {
            return Ok(None);
        }
        self.remove_file(id)?;
        self.order.retain(|k| k != id);
        let removed = self.docs.remove(id);
        self.write_index()?;
        Ok(removed)
    }

    /// Removes every matching document and hands them back. Documents are
    /// removed one at a time; a failure part way leaves the earlier ones gone.
    pub fn delete_many<F>(&mut self, filter: F) -> StoreResult<Vec<D>>
    where
        F: Fn(&D) -> bool,
    {
        let keys = self.find(filter).into_iter().map(|d| d.key().to_string()).collect::<Vec<_>>();
        let mut deleted = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(doc) = self.find_by_id_and_delete(&key)? {
                deleted.push(doc);
            }
        }
        Ok(deleted)
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(format!("{}.json", id)))
    }

    fn write(&self, doc: &D) -> StoreResult<()> {
        let Some(path) = self.path_for(doc.key()) else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Json { path: path.clone(), source })?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }

    fn write_index(&self) -> StoreResult<()> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };
        let path = index_path(dir);
        let json = serde_json::to_string(&self.order).map_err(|source| StoreError::Json { path: path.clone(), source })?;
        fs::write(&path, json).map_err(|source| StoreError::Io { path, source })
    }

    fn remove_file(&self, id: &str) -> StoreResult<()> {
        let Some(path) = self.path_for(id) else {
            return Ok(());
        };
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn index_path(dir: &Path) -> PathBuf {
    dir.with_extension("order.json")
}

fn read_index(path: &Path) -> StoreResult<Vec<String>> {
    match read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json { path: path.to_path_buf(), source }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(vec![]),
        Err(source) => Err(StoreError::Io { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ThoughtID, UserID};

    fn user(id: &str, name: &str) -> User {
        User::new(UserID(id.to_string()), name, &format!("{}@x.com", name))
    }

    #[test]
    fn ids_are_unique_and_sized() {
        let a = gen_id();
        let b = gen_id();
        assert_eq!(a.len(), 24);
        assert_ne!(a, b);
    }

    #[test]
    fn find_keeps_insertion_order() {
        let mut users = Collection::<User>::in_memory();
        users.insert(user("b", "bob")).unwrap();
        users.insert(user("a", "alice")).unwrap();
        users.insert(user("c", "carol")).unwrap();

        let names = users.all().iter().map(|u| u.username.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["bob", "alice", "carol"]);

        let found = users.find(|u| u.username.contains('o'));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].username, "bob");
    }

    #[test]
    fn update_and_delete_by_id() {
        let mut users = Collection::<User>::in_memory();
        users.insert(user("a", "alice")).unwrap();

        let updated = users
            .find_by_id_and_update("a", |u| u.thoughts.push(ThoughtID("t1".into())))
            .unwrap()
            .unwrap();
        assert_eq!(updated.thoughts, vec![ThoughtID("t1".into())]);

        assert!(users.find_by_id_and_update("missing", |_| {}).unwrap().is_none());
        assert!(users.find_one_and_update(|u| u.username == "nobody", |_| {}).unwrap().is_none());

        let deleted = users.find_by_id_and_delete("a").unwrap().unwrap();
        assert_eq!(deleted.username, "alice");
        assert!(users.find_by_id("a").is_none());
        assert!(users.find_by_id_and_delete("a").unwrap().is_none());
        assert!(users.is_empty());
    }

    #[test]
    fn delete_many_returns_removed_documents() {
        let mut thoughts = Collection::<Thought>::in_memory();
        thoughts.insert(Thought::new(ThoughtID("1".into()), "a", "alice")).unwrap();
        thoughts.insert(Thought::new(ThoughtID("2".into()), "b", "bob")).unwrap();
        thoughts.insert(Thought::new(ThoughtID("3".into()), "c", "alice")).unwrap();

        let deleted = thoughts.delete_many(|t| t.username == "alice").unwrap();
        assert_eq!(deleted.len(), 2);
        assert_eq!(thoughts.len(), 1);
        assert_eq!(thoughts.all()[0].username, "bob");
    }

    #[test]
    fn files_survive_reopen() {
        let root = tempfile::tempdir().unwrap();
        {
            let mut users = Collection::<User>::open(root.path()).unwrap();
            users.insert(user("00000001aaaa", "alice")).unwrap();
            users.insert(user("00000002bbbb", "bob")).unwrap();
            users.find_by_id_and_update("00000001aaaa", |u| u.friends.push(UserID("00000002bbbb".into()))).unwrap();
            users.find_by_id_and_delete("00000002bbbb").unwrap();
        }
        assert!(root.path().join("users/00000001aaaa.json").exists());
        assert!(!root.path().join("users/00000002bbbb.json").exists());

        let users = Collection::<User>::open(root.path()).unwrap();
        assert_eq!(users.len(), 1);
        let alice = users.find_by_id("00000001aaaa").unwrap();
        assert_eq!(alice.friends, vec![UserID("00000002bbbb".into())]);
    }

    #[test]
    fn reopen_keeps_creation_order() {
        let root = tempfile::tempdir().unwrap();
        let names = (0..20).map(|i| format!("user{}", i)).collect::<Vec<_>>();
        {
            let mut users = Collection::<User>::open(root.path()).unwrap();
            for name in &names {
                let id = users.gen_id();
                users.insert(user(&id, name)).unwrap();
            }
            let third = users.all()[3].id.0.clone();
            users.find_by_id_and_delete(&third).unwrap();
        }
        assert!(root.path().join("users.order.json").exists());

        let users = Collection::<User>::open(root.path()).unwrap();
        let loaded = users.all().iter().map(|u| u.username.clone()).collect::<Vec<_>>();
        let expected = names.iter().filter(|n| n.as_str() != "user3").cloned().collect::<Vec<_>>();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn unindexed_documents_load_last_by_id() {
        let root = tempfile::tempdir().unwrap();
        {
            let mut users = Collection::<User>::open(root.path()).unwrap();
            users.insert(user("b", "bob")).unwrap();
            users.insert(user("a", "alice")).unwrap();
        }
        fs::write(root.path().join("users.order.json"), r#"["b","gone"]"#).unwrap();
        let stray = serde_json::to_string(&user("0", "zed")).unwrap();
        fs::write(root.path().join("users/0.json"), stray).unwrap();

        let users = Collection::<User>::open(root.path()).unwrap();
        let names = users.all().iter().map(|u| u.username.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["bob", "zed", "alice"]);
    }

    #[test]
    fn file_name_must_match_id() {
        let root = tempfile::tempdir().unwrap();
        create_dir_all(root.path().join("users")).unwrap();
        let doc = serde_json::to_string(&user("y", "yan")).unwrap();
        fs::write(root.path().join("users/x.json"), doc).unwrap();

        let err = Collection::<User>::open(root.path()).err().unwrap();
        assert!(matches!(err, StoreError::Mismatch { ref id, .. } if id == "y"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let root = tempfile::tempdir().unwrap();
        create_dir_all(root.path().join("users")).unwrap();
        fs::write(root.path().join("users/broken.json"), "{ not json").unwrap();

        let err = Collection::<User>::open(root.path()).err().unwrap();
        assert!(matches!(err, StoreError::Json { .. }));
    }
}
