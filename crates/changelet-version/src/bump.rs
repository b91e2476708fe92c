use changelet_core::BumpType;
use semver::{BuildMetadata, Prerelease, Version};

#[must_use]
pub fn bump_version(version: &Version, bump_type: BumpType) -> Version {
    match bump_type {
        BumpType::Major => bump_major(version),
        BumpType::Minor => bump_minor(version),
        BumpType::Patch => bump_patch(version),
    }
}

#[must_use]
pub fn bump_major(version: &Version) -> Version {
    Version::new(version.major + 1, 0, 0)
}

#[must_use]
pub fn bump_minor(version: &Version) -> Version {
    Version::new(version.major, version.minor + 1, 0)
}

#[must_use]
pub fn bump_patch(version: &Version) -> Version {
    let mut new_version = version.clone();
    new_version.patch += 1;
    new_version.pre = Prerelease::EMPTY;
    new_version.build = BuildMetadata::EMPTY;
    new_version
}
