//! Code regarding file input (reading source `.jack` files)
//! and output (writing generated files next to them).
//!
//! ## Input
//! The compiler is given either a single `.jack` file or a directory,
//! in which case every `.jack` file directly inside it is compiled
//! (nested directories are not searched).
//!
//! ## Output
//! Output is written alongside the source: `Main.jack` compiles
//! to `Main.vm` (or `Main_output.xml` for the analyzer).

pub mod input {
    use std::{
        fs, io,
        path::{Path, PathBuf},
    };

    const SOURCE_EXTENSION: &str = "jack";

    fn is_source_file(path: &Path) -> bool {
        path.is_file() && path.extension().is_some_and(|extension| extension == SOURCE_EXTENSION)
    }

    /// Collect the source files to compile, in file name order.
    ///
    /// A directory without any source file is an error.
    pub fn discover(input: &Path) -> io::Result<Vec<PathBuf>> {
        if input.is_dir() {
            let mut sources = fs::read_dir(input)?
                .map(|entry| entry.map(|entry| entry.path()))
                .collect::<io::Result<Vec<_>>>()?;

            sources.retain(|path| is_source_file(path));
            sources.sort();

            if sources.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "directory contains no `.jack` files",
                ));
            }

            Ok(sources)
        } else if is_source_file(input) {
            Ok(vec![input.to_path_buf()])
        } else if input.exists() {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "input is neither a `.jack` file nor a directory",
            ))
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "input path does not exist"))
        }
    }

    #[derive(Debug)]
    pub struct SourceFile {
        path: PathBuf,
        content: String,
    }

    impl SourceFile {
        pub fn load(path: &Path) -> io::Result<Self> {
            Ok(Self {
                path: path.to_path_buf(),
                content: fs::read_to_string(path)?,
            })
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        pub fn content(&self) -> &str {
            &self.content
        }
    }
}

pub mod output {
    use std::{
        fs,
        io::{self, BufWriter, Write},
        path::{Path, PathBuf},
    };

    use crate::codegen::vm::VMModule;

    /// `Main.jack` -> `Main.vm`
    pub fn vm_path(source_path: &Path) -> PathBuf {
        source_path.with_extension("vm")
    }

    /// `Main.jack` -> `Main_output.xml`
    pub fn xml_path(source_path: &Path) -> PathBuf {
        let stem = source_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        source_path.with_file_name(format!("{stem}_output.xml"))
    }

    pub fn write_vm(path: &Path, module: &VMModule) -> io::Result<()> {
        let mut writer = BufWriter::new(fs::File::create(path)?);
        module.write_to(&mut writer)?;

        writer.flush()
    }

    pub fn write_text(path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    use super::*;

    /// A fresh scratch directory for a single test.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("jackc-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("scratch directory should be created");
        dir
    }

    #[test]
    fn test_discover_directory() {
        let dir = scratch_dir("discover");
        for file in ["Main.jack", "Ball.jack", "notes.txt", "Main.vm"] {
            fs::write(dir.join(file), "").expect("file should be written");
        }
        fs::create_dir(dir.join("Nested.jack")).expect("directory should be created");

        let sources = input::discover(&dir).expect("directory should be readable");

        assert_eq!(sources, vec![dir.join("Ball.jack"), dir.join("Main.jack")]);

        fs::remove_dir_all(&dir).expect("scratch directory should be removed");
    }

    #[test]
    fn test_discover_directory_without_sources() {
        let dir = scratch_dir("empty");
        fs::write(dir.join("Main.vm"), "").expect("file should be written");

        assert!(input::discover(&dir)
            .is_err_and(|error| error.kind() == std::io::ErrorKind::NotFound));

        fs::remove_dir_all(&dir).expect("scratch directory should be removed");
    }

    #[test]
    fn test_discover_single_file() {
        let dir = scratch_dir("single");
        let source = dir.join("Main.jack");
        let other = dir.join("Main.txt");
        fs::write(&source, "class Main {}").expect("file should be written");
        fs::write(&other, "").expect("file should be written");

        assert_eq!(
            input::discover(&source).expect("file should be accepted"),
            vec![source.clone()]
        );
        assert!(input::discover(&other).is_err());
        assert!(input::discover(&dir.join("Missing.jack")).is_err());

        let loaded = input::SourceFile::load(&source).expect("file should load");
        assert_eq!(loaded.path(), source.as_path());
        assert_eq!(loaded.content(), "class Main {}");

        fs::remove_dir_all(&dir).expect("scratch directory should be removed");
    }

    #[test]
    fn test_output_paths() {
        let source = Path::new("project/Square/Square.jack");

        assert_eq!(output::vm_path(source), Path::new("project/Square/Square.vm"));
        assert_eq!(
            output::xml_path(source),
            Path::new("project/Square/Square_output.xml")
        );
    }

    #[test]
    fn test_write_vm() {
        let dir = scratch_dir("write");
        let path = dir.join("Main.vm");

        let module = crate::compile("class Main { function void main() { return; } }")
            .expect("source should compile");
        output::write_vm(&path, &module).expect("output should be written");

        assert_eq!(
            fs::read_to_string(&path).expect("output should be readable"),
            "function Main.main 0\npush constant 0\nreturn\n"
        );

        fs::remove_dir_all(&dir).expect("scratch directory should be removed");
    }
}
