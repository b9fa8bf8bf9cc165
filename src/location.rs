use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Result, SubliftError};

/// Parsed S3 location of a media object.
///
/// Built from virtual-hosted-style URLs (`https://{bucket}.s3.{region}.amazonaws.com/{key}`),
/// path-style URLs (`https://s3.{region}.amazonaws.com/{bucket}/{key}`) and
/// `s3://bucket/key` URIs. S3 URIs carry no region, so `region` stays `None`
/// and the object is treated as residing outside the service region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLocation {
    pub bucket: String,
    pub key: String,
    pub region: Option<String>,
}

impl MediaLocation {
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input)
            .map_err(|e| SubliftError::InvalidReference(format!("{}: {}", input, e)))?;

        match url.scheme() {
            "s3" => Self::from_s3_uri(&url),
            "http" | "https" => Self::from_http_url(&url),
            other => Err(SubliftError::InvalidReference(format!(
                "unsupported scheme '{}' in {}",
                other, input
            ))),
        }
    }

    fn from_s3_uri(url: &Url) -> Result<Self> {
        let bucket = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                SubliftError::InvalidReference(format!("missing bucket in {}", url))
            })?
            .to_string();

        Ok(Self {
            bucket,
            key: decode_key(url.path(), url)?,
            region: None,
        })
    }

    fn from_http_url(url: &Url) -> Result<Self> {
        let host = url.host_str().ok_or_else(|| {
            SubliftError::InvalidReference(format!("missing host in {}", url))
        })?;

        let endpoint = host.strip_suffix(".amazonaws.com").ok_or_else(|| {
            SubliftError::InvalidReference(format!("not an S3 endpoint: {}", host))
        })?;

        if let Some(region) = endpoint.strip_prefix("s3.") {
            // Path-style: the first path segment is the bucket
            let key_path = url.path();
            let (bucket, key) = key_path
                .strip_prefix('/')
                .unwrap_or(key_path)
                .split_once('/')
                .ok_or_else(|| {
                    SubliftError::InvalidReference(format!("missing object key in {}", url))
                })?;

            if bucket.is_empty() {
                return Err(SubliftError::InvalidReference(format!(
                    "missing bucket in {}",
                    url
                )));
            }

            Ok(Self {
                bucket: bucket.to_string(),
                key: decode_key(key, url)?,
                region: non_empty_region(region, url)?,
            })
        } else if let Some((bucket, region)) = endpoint.split_once(".s3.") {
            // Virtual-hosted-style: the bucket is the leading host label
            if bucket.is_empty() {
                return Err(SubliftError::InvalidReference(format!(
                    "missing bucket in {}",
                    url
                )));
            }

            Ok(Self {
                bucket: bucket.to_string(),
                key: decode_key(url.path(), url)?,
                region: non_empty_region(region, url)?,
            })
        } else {
            Err(SubliftError::InvalidReference(format!(
                "unrecognized S3 host layout: {}",
                host
            )))
        }
    }

    /// Base name of the object, used to keep staged copies traceable.
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(self.key.as_str())
    }
}

/// Public HTTPS URL for an object under the deployment's addressing scheme.
pub fn public_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}

fn non_empty_region(region: &str, url: &Url) -> Result<Option<String>> {
    if region.is_empty() {
        Err(SubliftError::InvalidReference(format!(
            "missing region in {}",
            url
        )))
    } else {
        Ok(Some(region.to_string()))
    }
}

/// Decode percent-encoded bytes in an object key. Keys arrive URL-encoded in
/// the path component but the storage API expects them decoded.
fn decode_key(path: &str, url: &Url) -> Result<String> {
    let raw = path.strip_prefix('/').unwrap_or(path);
    if raw.is_empty() {
        return Err(SubliftError::InvalidReference(format!(
            "missing object key in {}",
            url
        )));
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|_| SubliftError::InvalidReference(format!("malformed object key in {}", url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_virtual_hosted_url() {
        let location =
            MediaLocation::parse("https://my-bucket.s3.us-east-1.amazonaws.com/videos/a.mp4")
                .unwrap();

        assert_eq!(location.bucket, "my-bucket");
        assert_eq!(location.key, "videos/a.mp4");
        assert_eq!(location.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_parse_path_style_url() {
        let location =
            MediaLocation::parse("https://s3.us-west-1.amazonaws.com/my-bucket/videos/a.mp4")
                .unwrap();

        assert_eq!(location.bucket, "my-bucket");
        assert_eq!(location.key, "videos/a.mp4");
        assert_eq!(location.region.as_deref(), Some("us-west-1"));
    }

    #[test]
    fn test_parse_s3_uri_has_no_region() {
        let location = MediaLocation::parse("s3://other-bucket/videos/a.mp4").unwrap();

        assert_eq!(location.bucket, "other-bucket");
        assert_eq!(location.key, "videos/a.mp4");
        assert_eq!(location.region, None);
    }

    #[test]
    fn test_parse_decodes_percent_encoded_keys() {
        let location =
            MediaLocation::parse("https://b.s3.us-west-1.amazonaws.com/videos/my%20clip.mp4")
                .unwrap();

        assert_eq!(location.key, "videos/my clip.mp4");
        assert_eq!(location.file_name(), "my clip.mp4");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in [
            "not a url",
            "ftp://bucket/key",
            "https://example.com/videos/a.mp4",
            "https://my-bucket.s3.us-east-1.amazonaws.com/",
            "https://my-bucket.s3.us-east-1.amazonaws.com/videos/%FF.mp4",
            "s3://bucket-without-key",
        ] {
            let result = MediaLocation::parse(input);
            assert!(
                matches!(result, Err(SubliftError::InvalidReference(_))),
                "expected InvalidReference for {:?}, got {:?}",
                input,
                result
            );
        }
    }

    #[test]
    fn test_file_name_returns_base_name() {
        let location = MediaLocation::parse("s3://bucket/deep/path/movie.mp4").unwrap();
        assert_eq!(location.file_name(), "movie.mp4");
    }

    #[test]
    fn test_public_url_layout() {
        assert_eq!(
            public_url("my-bucket", "us-west-1", "subtitles/job.vtt"),
            "https://my-bucket.s3.us-west-1.amazonaws.com/subtitles/job.vtt"
        );
    }
}
