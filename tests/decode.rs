use assert_fs::TempDir;
use flate2::{write::ZlibEncoder, Compression};
use loose_objects::{Error, GitObject, ObjectId, ObjectKind, ObjectLocator, ObjectStore};
use pretty_assertions::assert_eq;
use sha1::{Digest, Sha1};
use std::fs;
use std::io::Write;

const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
const PARENT_1: &str = "e88f7a929cd70b0274c4ea33b209c97fa845fdbc";
const PARENT_2: &str = "3b18e512dba79e4c8300dd08aeb37f8e728b8dad";
const SIGNATURE: &str = "Kanji Tanaka <sumireminami@gmail.com> 1700000000 +0900";

/// Writes `<kind> <len>\0<body>` the way git would and returns its id.
fn write_object(locator: &ObjectLocator, kind: &str, body: &[u8]) -> anyhow::Result<ObjectId> {
    let mut data = format!("{kind} {}\0", body.len()).into_bytes();
    data.extend_from_slice(body);

    let hash: [u8; 20] = Sha1::digest(&data).into();
    let id = ObjectId::from(hash);
    let path = locator.path(&id);
    fs::create_dir_all(path.parent().expect("object path has a parent"))?;

    let mut e = ZlibEncoder::new(fs::File::create(path)?, Compression::default());
    e.write_all(&data)?;
    e.finish()?;
    Ok(id)
}

#[test]
fn it_decodes_merge_commit() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let locator = ObjectLocator::new(dir.path());
    let body = format!(
        "tree {TREE}\nparent {PARENT_1}\nparent {PARENT_2}\nauthor {SIGNATURE}\ncommitter {SIGNATURE}\n\nMerge branch 'feature'\n\nResolve conflicts in README.\n"
    );
    let id = write_object(&locator, "commit", body.as_bytes())?;

    let commit = ObjectStore::new(locator).strict_size(true).read_commit(&id)?;

    assert_eq!(commit.tree(), TREE);
    assert_eq!(commit.parents(), [PARENT_1, PARENT_2]);
    assert_eq!(commit.author(), SIGNATURE);
    assert_eq!(commit.committer(), SIGNATURE);
    assert_eq!(
        commit.message(),
        "Merge branch 'feature'\n\nResolve conflicts in README.\n"
    );
    Ok(())
}

#[test]
fn it_decodes_commit_from_hex_id() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let locator = ObjectLocator::new(dir.path());
    let body = format!("tree {TREE}\nauthor {SIGNATURE}\ncommitter {SIGNATURE}\n\nfirst\n");
    let id = write_object(&locator, "commit", body.as_bytes())?;

    let store = ObjectStore::new(locator);
    let obj = store.open(&id.hex().parse()?)?;

    assert_eq!(obj.kind(), ObjectKind::Commit);
    assert_eq!(obj.header().size, body.len());
    assert!(matches!(obj, GitObject::Commit(_, ref c) if c.parents().is_empty()));
    Ok(())
}

#[test]
fn it_returns_header_only_for_tree() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let locator = ObjectLocator::new(dir.path());
    let id = write_object(&locator, "tree", b"")?;

    let store = ObjectStore::new(locator);
    let obj = store.open(&id)?;

    assert_eq!(obj.kind(), ObjectKind::Tree);
    assert_eq!(obj.header().size, 0);
    assert!(matches!(
        store.read_commit(&id),
        Err(Error::NotACommit(ObjectKind::Tree))
    ));
    Ok(())
}

#[test]
fn it_fails_on_unknown_commit_field() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let locator = ObjectLocator::new(dir.path());
    let body = format!("tree {TREE}\nencoding ISO-8859-1\nauthor {SIGNATURE}\n\nmsg");
    let id = write_object(&locator, "commit", body.as_bytes())?;

    let err = ObjectStore::new(locator).read_commit(&id).unwrap_err();
    assert!(matches!(err, Error::UnknownField(ref key) if key == "encoding"));
    Ok(())
}

#[test]
fn it_distinguishes_missing_from_corrupt() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let locator = ObjectLocator::new(dir.path());
    let store = ObjectStore::new(locator.clone());

    let missing: ObjectId = PARENT_1.parse()?;
    assert!(matches!(store.open(&missing), Err(Error::NotFound(_))));

    let id = write_object(&locator, "commit", b"tree x\n\n")?;
    let path = locator.path(&id);
    let compressed = fs::read(&path)?;
    fs::write(&path, &compressed[..compressed.len() - 6])?;

    assert!(matches!(store.open(&id), Err(Error::CorruptObject(_))));
    Ok(())
}

#[test]
fn it_rejects_malformed_identifier() {
    let err = "not-a-hash".parse::<ObjectId>().unwrap_err();
    assert!(matches!(err, Error::InvalidIdentifier(_)));
}

#[test]
fn it_decodes_concurrently() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let locator = ObjectLocator::new(dir.path());
    let ids = (0..8)
        .map(|i| {
            let body = format!("tree {TREE}\nauthor {SIGNATURE}\ncommitter {SIGNATURE}\n\ncommit {i}\n");
            write_object(&locator, "commit", body.as_bytes())
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let store = ObjectStore::new(locator);

    std::thread::scope(|s| {
        let handles: Vec<_> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let store = &store;
                s.spawn(move || {
                    let commit = store.read_commit(id).unwrap();
                    assert_eq!(commit.message(), format!("commit {i}\n"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
    Ok(())
}
