//! File-level API tests: compress and decompress real files through the
//! dispatch layer, standard-stream fallbacks excluded.

use std::fs;

use tempfile::TempDir;

use lz78::io::dispatch::{exec, Algorithm, WrapperError};
use lz78::io::prefs::{Mode, Prefs};
use lz78::Lz78Error;

fn compress_prefs(dict_size: u32) -> Prefs {
    Prefs {
        mode: Mode::Compress,
        dict_size,
        ..Prefs::default()
    }
}

fn decompress_prefs() -> Prefs {
    Prefs {
        mode: Mode::Decompress,
        ..Prefs::default()
    }
}

#[test]
fn file_roundtrip_large_text() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("corpus.txt");
    let packed = dir.path().join("corpus.lz78");
    let restored = dir.path().join("corpus.out");

    let mut data = Vec::new();
    for i in 0u32..50_000 {
        data.extend_from_slice(format!("line {} of the corpus\n", i % 777).as_bytes());
    }
    fs::write(&plain, &data).unwrap();

    exec(&compress_prefs(0), Algorithm::Lz78, Some(plain.as_path()), Some(packed.as_path())).unwrap();
    assert!(fs::metadata(&packed).unwrap().len() < data.len() as u64);

    exec(&decompress_prefs(), Algorithm::Lz78, Some(packed.as_path()), Some(restored.as_path())).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn file_roundtrip_small_dictionary() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("in.bin");
    let packed = dir.path().join("in.lz78");
    let restored = dir.path().join("in.out");

    let data: Vec<u8> = (0u32..100_000).map(|i| (i * 7 % 253) as u8).collect();
    fs::write(&plain, &data).unwrap();

    exec(&compress_prefs(300), Algorithm::Lz78, Some(plain.as_path()), Some(packed.as_path())).unwrap();
    exec(&decompress_prefs(), Algorithm::Lz78, Some(packed.as_path()), Some(restored.as_path())).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn empty_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("empty");
    let packed = dir.path().join("empty.lz78");
    let restored = dir.path().join("empty.out");
    fs::write(&plain, b"").unwrap();

    exec(&compress_prefs(0), Algorithm::Lz78, Some(plain.as_path()), Some(packed.as_path())).unwrap();
    assert_eq!(fs::metadata(&packed).unwrap().len(), 6);
    exec(&decompress_prefs(), Algorithm::Lz78, Some(packed.as_path()), Some(restored.as_path())).unwrap();
    assert_eq!(fs::metadata(&restored).unwrap().len(), 0);
}

#[test]
fn decompressing_garbage_file_fails() {
    let dir = TempDir::new().unwrap();
    let garbage = dir.path().join("garbage");
    let out = dir.path().join("out");
    fs::write(&garbage, vec![0x5Au8; 1024]).unwrap();

    let err = exec(&decompress_prefs(), Algorithm::Lz78, Some(garbage.as_path()), Some(out.as_path())).unwrap_err();
    assert!(matches!(err, WrapperError::Engine(Lz78Error::Decompress)));
}
