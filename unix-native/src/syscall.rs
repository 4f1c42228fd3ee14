//! Forwarding shims for filesystem calls that are missing on some platforms.
//!
//! The `portable_*` functions keep the C signature of the call they wrap:
//! they return the call's result unchanged and leave its `errno` in place.
//! On platforms without the call they return `-1` with `errno` set to
//! `ENOSYS`. The safe wrappers below them convert that convention into
//! [`io::Result`].

use std::ffi::CStr;
use std::io;
use std::mem::MaybeUninit;

use libc::c_char;
use libc::c_int;
use libc::c_void;
use libc::size_t;
use libc::ssize_t;

/// Runs `fstatat(2)`, or fails with `ENOSYS` where it does not exist.
///
/// # Safety
///
/// `name` must point to a NUL-terminated string and `statbuf` to writable
/// storage for one `struct stat`.
pub unsafe fn portable_fstatat(
    dirfd: c_int,
    name: *const c_char,
    statbuf: *mut libc::stat,
    flags: c_int,
) -> c_int {
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "solaris",
        target_os = "illumos"
    ))]
    {
        unsafe { libc::fstatat(dirfd, name, statbuf, flags) }
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "solaris",
        target_os = "illumos"
    )))]
    {
        let _ = (dirfd, name, statbuf, flags);
        unsupported()
    }
}

/// Runs `getxattr(2)`, or fails with `ENOSYS` where it does not exist.
///
/// # Safety
///
/// `path` and `name` must point to NUL-terminated strings and `value` must be
/// writable for `size` bytes.
pub unsafe fn portable_getxattr(
    path: *const c_char,
    name: *const c_char,
    value: *mut c_void,
    size: size_t,
) -> ssize_t {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        unsafe { libc::getxattr(path, name, value, size) }
    }

    #[cfg(any(target_os = "macos", target_os = "ios"))]
    {
        unsafe { libc::getxattr(path, name, value, size, 0, 0) }
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios"
    )))]
    {
        let _ = (path, name, value, size);
        unsupported()
    }
}

/// Runs `lgetxattr(2)`, which does not follow a trailing symlink, or fails
/// with `ENOSYS` where it does not exist.
///
/// # Safety
///
/// Same requirements as [`portable_getxattr`].
pub unsafe fn portable_lgetxattr(
    path: *const c_char,
    name: *const c_char,
    value: *mut c_void,
    size: size_t,
) -> ssize_t {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        unsafe { libc::lgetxattr(path, name, value, size) }
    }

    // Darwin folds lgetxattr into getxattr's options argument.
    #[cfg(any(target_os = "macos", target_os = "ios"))]
    {
        unsafe { libc::getxattr(path, name, value, size, 0, libc::XATTR_NOFOLLOW) }
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios"
    )))]
    {
        let _ = (path, name, value, size);
        unsupported()
    }
}

/// `fstatat(2)` returning the filled-in record.
pub fn fstatat(dirfd: c_int, name: &CStr, flags: c_int) -> io::Result<libc::stat> {
    let mut statbuf = MaybeUninit::<libc::stat>::uninit();
    // SAFETY: `name` is NUL-terminated and `statbuf` has room for one record.
    let rc = unsafe { portable_fstatat(dirfd, name.as_ptr(), statbuf.as_mut_ptr(), flags) };
    if rc == -1 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: fstatat fills the whole record on success.
    Ok(unsafe { statbuf.assume_init() })
}

/// Reads attribute `name` of `path` into `value`, following symlinks.
///
/// Returns the attribute's length. With an empty `value` nothing is copied
/// and the length tells the caller how large a buffer to pass.
pub fn getxattr(path: &CStr, name: &CStr, value: &mut [u8]) -> io::Result<usize> {
    // SAFETY: both strings are NUL-terminated and `value` is writable for its length.
    let rc = unsafe {
        portable_getxattr(
            path.as_ptr(),
            name.as_ptr(),
            value.as_mut_ptr().cast(),
            value.len(),
        )
    };
    xattr_len(rc)
}

/// Like [`getxattr`], but reads the attribute of a symlink itself.
pub fn lgetxattr(path: &CStr, name: &CStr, value: &mut [u8]) -> io::Result<usize> {
    // SAFETY: both strings are NUL-terminated and `value` is writable for its length.
    let rc = unsafe {
        portable_lgetxattr(
            path.as_ptr(),
            name.as_ptr(),
            value.as_mut_ptr().cast(),
            value.len(),
        )
    };
    xattr_len(rc)
}

fn xattr_len(rc: ssize_t) -> io::Result<usize> {
    usize::try_from(rc).map_err(|_| io::Error::last_os_error())
}

/// The calling thread's current `errno`.
pub fn last_errno() -> c_int {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

#[cfg_attr(
    any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "ios"),
    allow(dead_code)
)]
fn unsupported<T: From<i8>>() -> T {
    set_errno(libc::ENOSYS);
    T::from(-1)
}

fn set_errno(error_number: c_int) {
    // SAFETY: the errno location is a valid pointer to this thread's errno.
    unsafe { *errno_location() = error_number };
}

#[cfg(target_os = "linux")]
unsafe fn errno_location() -> *mut c_int {
    unsafe { libc::__errno_location() }
}

#[cfg(any(target_os = "android", target_os = "netbsd", target_os = "openbsd"))]
unsafe fn errno_location() -> *mut c_int {
    unsafe { libc::__errno() }
}

#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
unsafe fn errno_location() -> *mut c_int {
    unsafe { libc::__error() }
}

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
unsafe fn errno_location() -> *mut c_int {
    unsafe { libc::___errno() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::ffi::CString;
    use std::fs;
    use std::io::Write;
    use std::os::fd::AsRawFd;
    use std::os::unix::fs::symlink;
    use std::path::Path;
    use tempfile::TempDir;

    fn c_path(path: &Path) -> CString {
        CString::new(path.as_os_str().as_encoded_bytes()).unwrap()
    }

    #[test]
    fn fstatat_reports_size_relative_to_cwd() -> io::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("five");
        fs::File::create(&path)?.write_all(b"12345")?;

        let statbuf = fstatat(libc::AT_FDCWD, &c_path(&path), 0)?;
        assert_eq!(statbuf.st_size, 5);
        assert_eq!(statbuf.st_mode & libc::S_IFMT, libc::S_IFREG);
        Ok(())
    }

    #[test]
    fn fstatat_resolves_names_against_dirfd() -> io::Result<()> {
        let dir = TempDir::new()?;
        fs::create_dir(dir.path().join("sub"))?;
        let dir_handle = fs::File::open(dir.path())?;

        let statbuf = fstatat(dir_handle.as_raw_fd(), c"sub", 0)?;
        assert_eq!(statbuf.st_mode & libc::S_IFMT, libc::S_IFDIR);
        Ok(())
    }

    #[test]
    fn fstatat_nofollow_stats_the_link_itself() -> io::Result<()> {
        let dir = TempDir::new()?;
        let link = dir.path().join("dangling");
        symlink(dir.path().join("missing"), &link)?;
        let link = c_path(&link);

        let statbuf = fstatat(libc::AT_FDCWD, &link, libc::AT_SYMLINK_NOFOLLOW)?;
        assert_eq!(statbuf.st_mode & libc::S_IFMT, libc::S_IFLNK);

        let errno = fstatat(libc::AT_FDCWD, &link, 0)
            .err()
            .and_then(|err| err.raw_os_error());
        assert_eq!(errno, Some(libc::ENOENT));
        Ok(())
    }

    #[test]
    fn portable_fstatat_leaves_errno_from_the_call() -> io::Result<()> {
        let dir = TempDir::new()?;
        let missing = c_path(&dir.path().join("missing"));
        let mut statbuf = MaybeUninit::<libc::stat>::uninit();

        let rc =
            unsafe { portable_fstatat(libc::AT_FDCWD, missing.as_ptr(), statbuf.as_mut_ptr(), 0) };
        assert_eq!(rc, -1);
        assert_eq!(last_errno(), libc::ENOENT);
        Ok(())
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "ios"))]
    #[test]
    fn getxattr_on_missing_path_fails_with_enoent() -> io::Result<()> {
        let dir = TempDir::new()?;
        let missing = c_path(&dir.path().join("missing"));

        for read in [getxattr, lgetxattr] {
            let err = read(&missing, c"user.devtools.test", &mut []).unwrap_err();
            assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
        }
        Ok(())
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos", target_os = "ios"))]
    #[test]
    fn lgetxattr_does_not_follow_dangling_symlink() -> io::Result<()> {
        let dir = TempDir::new()?;
        let link = dir.path().join("dangling");
        symlink(dir.path().join("missing"), &link)?;
        let link = c_path(&link);

        let followed = getxattr(&link, c"user.devtools.test", &mut []).unwrap_err();
        assert_eq!(followed.raw_os_error(), Some(libc::ENOENT));

        // The link exists, so whatever the failure is, it is not ENOENT.
        let not_followed = lgetxattr(&link, c"user.devtools.test", &mut []).unwrap_err();
        assert_ne!(not_followed.raw_os_error(), Some(libc::ENOENT));
        Ok(())
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios"
    )))]
    #[test]
    fn xattrs_are_unsupported_elsewhere() {
        for read in [getxattr, lgetxattr] {
            let err = read(c"/", c"user.devtools.test", &mut []).unwrap_err();
            assert_eq!(err.raw_os_error(), Some(libc::ENOSYS));
        }
    }

    #[test]
    fn unsupported_sets_enosys_for_every_return_type() {
        set_errno(0);
        let rc: c_int = unsupported();
        assert_eq!((rc, last_errno()), (-1, libc::ENOSYS));

        set_errno(0);
        let rc: ssize_t = unsupported();
        assert_eq!((rc, last_errno()), (-1, libc::ENOSYS));
    }

    #[test]
    fn unsupported_errno_translates_to_unsupported_operation() {
        let _: c_int = unsupported();
        assert_eq!(
            crate::ExceptionCategory::for_errno(last_errno()),
            crate::ExceptionCategory::UnsupportedOperation
        );
    }
}
