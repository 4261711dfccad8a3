use anyhow::{bail, Result};
use std::{fs, io::prelude::*, path::Path};

fn read_string(path: &Path) -> Result<String> {
    match fs::OpenOptions::new().read(true).open(path) {
        Ok(mut f) => {
            let mut contents = String::new();
            if let Err(e) = f.read_to_string(&mut contents) {
                bail!(
                    "Unable to read file contents. (File: '{}')\nDetails: {}",
                    path.display(),
                    e
                );
            }

            Ok(contents)
        }
        Err(e) => bail!(
            "Failed to open file. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

fn open_for_write(path: &Path, private: bool) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        if private {
            options.mode(0o600);
            let f = options.open(path)?;
            // mode() only applies to newly created files
            f.set_permissions(fs::Permissions::from_mode(0o600))?;
            return Ok(f);
        }
    }

    #[cfg(not(unix))]
    let _ = private;

    options.open(path)
}

fn write_string(contents: &str, path: &Path, private: bool) -> Result<()> {
    match open_for_write(path, private) {
        Ok(mut f) => {
            if let Err(e) = f.write_all(contents.as_bytes()) {
                bail!(
                    "Failed to write contents to file `{}`.\nDetails: {}",
                    path.display(),
                    e
                );
            }

            Ok(())
        }
        Err(e) => bail!(
            "Failed to open file. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

pub fn read_toml<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents = read_string(path)?;
    match toml::from_str::<T>(&contents) {
        Ok(r) => Ok(r),
        Err(e) => bail!(
            "Malformed TOML. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

/* Creates the parent directory if needed. The file is readable by the owner only, it holds secrets */
pub fn write_toml<T>(data: &T, path: &Path) -> Result<()>
where
    T: serde::ser::Serialize,
{
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let toml = toml::to_string(data)?;
    write_string(&toml, path, true)
}

pub fn read_json<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let contents = read_string(path)?;
    match serde_json::from_str::<T>(&contents) {
        Ok(r) => Ok(r),
        Err(e) => bail!(
            "Malformed JSON. (File: '{}')\nDetails: {}",
            path.display(),
            e
        ),
    }
}

pub fn write_json<T>(data: &T, path: &Path) -> Result<()>
where
    T: serde::ser::Serialize,
{
    let json = serde_json::to_string(data)?;
    write_string(&json, path, false)
}
