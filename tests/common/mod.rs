#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use helix_revlist::hash::Hash;
use helix_revlist::object::{Commit, Object, ObjectKind, Tag, Tree, TreeEntry};
use helix_revlist::storage::{MemoryObjectStore, ObjectStore, ObjectWriter};
use helix_revlist::Result;

pub const AUTHOR: &str = "Test User <test@test.com>";

// * other_branch   vendor stuff
// | * branch       some code in a branch
// |/
// * some_code      some code
// * json           some json
// *   master_merge Merge branch 'master'
// |\
// | *   pr_merge   Merge pull request #1
// | |\
// | | * changelog  Creating changelog
// | |/
// * | binary       binary file
// |/
// * initial        Initial commit
pub struct BasicRepo {
    pub store: MemoryObjectStore,
    pub initial: Commit,
    pub binary: Commit,
    pub changelog: Commit,
    pub pr_merge: Commit,
    pub master_merge: Commit,
    pub json: Commit,
    pub some_code: Commit,
    pub branch: Commit,
    pub other_branch: Commit,
}

impl BasicRepo {
    pub fn build() -> Result<Self> {
        let mut store = MemoryObjectStore::new();

        let base = vec![(".gitignore", "*.class\n"), ("LICENSE", "MIT License\n")];
        let binary_file = ("binary.jpg", "JFIF not really an image");
        let changelog_file = ("CHANGELOG", "Initial changelog\n");
        let json_files = [
            ("json/long.json", "{\"long\": true}\n"),
            ("json/short.json", "{}\n"),
        ];
        let code_files = [
            ("go/example.go", "package main\n"),
            ("php/crappy.php", "<?php echo 1;\n"),
        ];

        let initial = commit(&mut store, &base, vec![], 1, "Initial commit")?;

        let mut files = base.clone();
        files.push(binary_file);
        let binary = commit(&mut store, &files, vec![initial.hash], 2, "binary file")?;

        let mut files = base.clone();
        files.push(changelog_file);
        let changelog = commit(&mut store, &files, vec![initial.hash], 3, "Creating changelog")?;
        let pr_merge = commit(
            &mut store,
            &files,
            vec![initial.hash, changelog.hash],
            4,
            "Merge pull request #1",
        )?;

        let mut files = base.clone();
        files.push(binary_file);
        files.push(changelog_file);
        let master_merge = commit(
            &mut store,
            &files,
            vec![binary.hash, pr_merge.hash],
            5,
            "Merge branch 'master'",
        )?;

        files.extend(json_files);
        let json = commit(&mut store, &files, vec![master_merge.hash], 6, "some json")?;

        files.extend(code_files);
        let some_code = commit(&mut store, &files, vec![json.hash], 7, "some code")?;

        let mut branch_files = files.clone();
        branch_files.push(("README", "branch readme\n"));
        let branch = commit(
            &mut store,
            &branch_files,
            vec![some_code.hash],
            8,
            "some code in a branch",
        )?;

        let mut vendor_files = files.clone();
        vendor_files.push(("vendor/foo.go", "package foo\n"));
        let other_branch = commit(
            &mut store,
            &vendor_files,
            vec![some_code.hash],
            9,
            "vendor stuff",
        )?;

        Ok(Self {
            store,
            initial,
            binary,
            changelog,
            pr_merge,
            master_merge,
            json,
            some_code,
            branch,
            other_branch,
        })
    }

    pub fn all_commits(&self) -> Vec<&Commit> {
        vec![
            &self.initial,
            &self.binary,
            &self.changelog,
            &self.pr_merge,
            &self.master_merge,
            &self.json,
            &self.some_code,
            &self.branch,
            &self.other_branch,
        ]
    }

    /// Hash of the blob at `path` inside `commit`'s snapshot
    pub fn blob_at(&self, commit: &Commit, path: &str) -> Hash {
        path_hash(&self.store, commit.tree, path)
    }

    pub fn tree_at(&self, commit: &Commit, path: &str) -> Hash {
        path_hash(&self.store, commit.tree, path)
    }

    /// Keep only the hashes that are commits, preserving order
    pub fn commits_in(&self, hashes: &[Hash]) -> Vec<Hash> {
        hashes
            .iter()
            .copied()
            .filter(|h| self.store.kind_of(h) == Some(ObjectKind::Commit))
            .collect()
    }
}

/// The basic repository plus one commit on top of `other_branch` touching two
/// subdirectories.
pub fn fork_with_extra_commit(basic: &BasicRepo) -> Result<(MemoryObjectStore, Commit)> {
    let mut store = basic.store.clone();

    let example = store.write_blob(b"package main\n\nfunc main() {}\n")?;
    let go = Tree::new(vec![TreeEntry::file("example.go", example)]);
    store.write_tree(&go)?;

    let haskal_hs = store.write_blob(b"main = putStrLn \"hi\"\n")?;
    let haskal = Tree::new(vec![TreeEntry::file("haskal.hs", haskal_hs)]);
    store.write_tree(&haskal)?;

    let mut entries: Vec<TreeEntry> = store
        .resolve_tree(&basic.other_branch.tree)?
        .entries
        .into_iter()
        .filter(|e| e.name != "go")
        .collect();
    entries.push(TreeEntry::tree("go", go.hash));
    entries.push(TreeEntry::tree("haskal", haskal.hash));
    let root = Tree::new(entries);
    store.write_tree(&root)?;

    let extra = Commit::new(
        root.hash,
        vec![basic.other_branch.hash],
        AUTHOR,
        10,
        "conflicting changes",
    );
    store.write_commit(&extra)?;

    Ok((store, extra))
}

/// Commit -> tree with one empty file, and an annotated tag pointing at the commit
pub struct TagRepo {
    pub store: MemoryObjectStore,
    pub commit: Commit,
    pub tag: Tag,
    pub empty_blob: Hash,
}

impl TagRepo {
    pub fn build() -> Result<Self> {
        let mut store = MemoryObjectStore::new();

        let commit = commit(&mut store, &[("empty", "")], vec![], 1, "tagged")?;
        let empty_blob = path_hash(&store, commit.tree, "empty");
        let tag = Tag::new(commit.hash, ObjectKind::Commit, "v1.0.0", "release\n");
        store.write_tag(&tag)?;

        Ok(Self {
            store,
            commit,
            tag,
            empty_blob,
        })
    }
}

/// A repository whose root tree links a commit from another repository
pub struct SubmoduleRepo {
    pub store: MemoryObjectStore,
    pub head: Commit,
    pub linked: Hash,
}

impl SubmoduleRepo {
    pub fn build(linked: Hash) -> Result<Self> {
        let mut store = MemoryObjectStore::new();

        let readme = store.write_blob(b"superproject\n")?;
        let nested_readme = store.write_blob(b"nested\n")?;
        let nested = Tree::new(vec![
            TreeEntry::file("README", nested_readme),
            TreeEntry::submodule("basic", linked),
        ]);
        store.write_tree(&nested)?;
        let root = Tree::new(vec![
            TreeEntry::file("README", readme),
            TreeEntry::submodule("basic", linked),
            TreeEntry::tree("deps", nested.hash),
        ]);
        store.write_tree(&root)?;

        let initial = Commit::new(root.hash, vec![], AUTHOR, 1, "add submodule");
        store.write_commit(&initial)?;
        let head = Commit::new(root.hash, vec![initial.hash], AUTHOR, 2, "touch");
        store.write_commit(&head)?;

        Ok(Self {
            store,
            head,
            linked,
        })
    }
}

/// Store wrapper recording every hash it is asked to resolve
pub struct RecordingStore<S> {
    pub inner: S,
    pub lookups: RefCell<Vec<Hash>>,
}

impl<S: ObjectStore> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn looked_up(&self, hash: &Hash) -> bool {
        self.lookups.borrow().contains(hash)
    }
}

impl<S: ObjectStore> ObjectStore for RecordingStore<S> {
    fn resolve(&self, hash: &Hash) -> Result<Object> {
        self.lookups.borrow_mut().push(*hash);
        self.inner.resolve(hash)
    }
}

pub fn to_set(hashes: &[Hash]) -> HashSet<Hash> {
    hashes.iter().copied().collect()
}

pub fn commit(
    store: &mut MemoryObjectStore,
    files: &[(&str, &str)],
    parents: Vec<Hash>,
    time: u64,
    message: &str,
) -> Result<Commit> {
    let tree = write_snapshot(store, files)?;
    let commit = Commit::new(tree, parents, AUTHOR, time, message);
    store.write_commit(&commit)?;
    Ok(commit)
}

/// Write blobs and nested trees for `path -> content` pairs, returning the root tree
pub fn write_snapshot(store: &mut MemoryObjectStore, files: &[(&str, &str)]) -> Result<Hash> {
    let mut here: Vec<TreeEntry> = Vec::new();
    let mut dirs: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();

    for &(path, content) in files {
        match path.split_once('/') {
            Some((dir, rest)) => dirs.entry(dir).or_default().push((rest, content)),
            None => {
                let blob = store.write_blob(content.as_bytes())?;
                here.push(TreeEntry::file(path, blob));
            }
        }
    }

    for (dir, children) in dirs {
        let subtree = write_snapshot(store, &children)?;
        here.push(TreeEntry::tree(dir, subtree));
    }

    let tree = Tree::new(here);
    store.write_tree(&tree)
}

fn path_hash(store: &MemoryObjectStore, root: Hash, path: &str) -> Hash {
    let mut current = root;
    for part in path.split('/') {
        let tree = store.resolve_tree(&current).expect("tree in fixture");
        current = tree
            .entries
            .iter()
            .find(|e| e.name == part)
            .map(|e| e.oid)
            .unwrap_or_else(|| panic!("{} not in fixture", path));
    }
    current
}
