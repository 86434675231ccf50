//! Parsing of WebDAV 207 multistatus bodies.

use std::time::SystemTime;

use roxmltree::{Document, Node};

use davmount_store::ResourceAttr;

use crate::Error;

const DAV_NS: &str = "DAV:";

fn find_dav<'a, 'input>(
    scope: Node<'a, 'input>,
    tag: &'static str,
) -> Option<Node<'a, 'input>> {
    scope.descendants().find(|n| n.has_tag_name((DAV_NS, tag)))
}

/// Parse a `Depth: 0` PROPFIND body into an attribute record.
///
/// Only the first `<response>` is consulted. A `<resourcetype>` with any
/// child element marks a collection; `<getcontentlength>` is absent on
/// collections and defaults to zero; `<getlastmodified>` is an HTTP-date
/// and optional.
pub fn parse_attr(body: &str) -> Result<ResourceAttr, Error> {
    let doc = Document::parse(body)?;
    let response = find_dav(doc.root_element(), "response")
        .ok_or(Error::MissingElement { element: "response" })?;
    let prop =
        find_dav(response, "prop").ok_or(Error::MissingElement { element: "prop" })?;

    let is_dir = find_dav(prop, "resourcetype")
        .map(|n| n.children().any(|c| c.is_element()))
        .unwrap_or(false);

    let size = match find_dav(prop, "getcontentlength").and_then(|n| n.text()) {
        Some(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::InvalidProperty {
                property: "getcontentlength",
                message: e.to_string(),
            })?,
        None => 0,
    };

    let mtime = find_dav(prop, "getlastmodified")
        .and_then(|n| n.text())
        .and_then(|s| chrono::DateTime::parse_from_rfc2822(s.trim()).ok())
        .map(SystemTime::from);

    let mut attr = if is_dir {
        ResourceAttr::directory()
    } else {
        ResourceAttr::file(size)
    };
    if let Some(mtime) = mtime {
        attr = attr.with_mtime(mtime);
    }
    Ok(attr)
}

/// Pull every `<response>`'s `<href>` out of a `Depth: 1` PROPFIND body,
/// in document order, still percent-encoded.
pub fn parse_hrefs(body: &str) -> Result<Vec<String>, Error> {
    let doc = Document::parse(body)?;
    doc.root_element()
        .descendants()
        .filter(|n| n.has_tag_name((DAV_NS, "response")))
        .map(|response| {
            find_dav(response, "href")
                .and_then(|n| n.text())
                .map(|s| s.trim().to_string())
                .ok_or(Error::MissingElement { element: "href" })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_STAT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/dav/docs/readme.txt</D:href>
    <D:propstat>
      <D:prop>
        <D:getcontentlength>10</D:getcontentlength>
        <D:getlastmodified>Fri, 21 Aug 2026 09:15:00 GMT</D:getlastmodified>
        <D:resourcetype/>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    const DIR_STAT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/dav/docs/</D:href>
    <D:propstat>
      <D:prop>
        <D:resourcetype><D:collection/></D:resourcetype>
        <D:getlastmodified>Fri, 21 Aug 2026 09:15:00 GMT</D:getlastmodified>
      </D:prop>
      <D:status>HTTP/1.1 200 OK</D:status>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    const LISTING: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ns0:multistatus xmlns:ns0="DAV:">
  <ns0:response>
    <ns0:href>/dav/docs/</ns0:href>
    <ns0:propstat><ns0:prop/><ns0:status>HTTP/1.1 200 OK</ns0:status></ns0:propstat>
  </ns0:response>
  <ns0:response>
    <ns0:href>/dav/docs/readme.txt</ns0:href>
    <ns0:propstat><ns0:prop/><ns0:status>HTTP/1.1 200 OK</ns0:status></ns0:propstat>
  </ns0:response>
  <ns0:response>
    <ns0:href>/dav/docs/hello%20world.txt</ns0:href>
    <ns0:propstat><ns0:prop/><ns0:status>HTTP/1.1 200 OK</ns0:status></ns0:propstat>
  </ns0:response>
</ns0:multistatus>"#;

    #[test]
    fn file_attr_parses() {
        let attr = parse_attr(FILE_STAT).unwrap();
        assert!(!attr.is_dir());
        assert_eq!(attr.size, 10);
        assert!(attr.mtime.is_some());
    }

    #[test]
    fn collection_attr_parses_without_length() {
        let attr = parse_attr(DIR_STAT).unwrap();
        assert!(attr.is_dir());
        assert_eq!(attr.size, 0);
    }

    #[test]
    fn hrefs_come_back_in_document_order() {
        let hrefs = parse_hrefs(LISTING).unwrap();
        assert_eq!(
            hrefs,
            vec![
                "/dav/docs/",
                "/dav/docs/readme.txt",
                "/dav/docs/hello%20world.txt"
            ]
        );
    }

    #[test]
    fn arbitrary_namespace_prefixes_are_accepted() {
        // Prefixes differ between servers; only the DAV: URI matters.
        let body = r#"<?xml version="1.0"?>
<v:multistatus xmlns:v="DAV:">
  <v:response>
    <v:href>/f.bin</v:href>
    <v:propstat>
      <v:prop><v:getcontentlength>7</v:getcontentlength><v:resourcetype/></v:prop>
    </v:propstat>
  </v:response>
</v:multistatus>"#;
        let attr = parse_attr(body).unwrap();
        assert_eq!(attr.size, 7);
        assert!(!attr.is_dir());
    }

    #[test]
    fn garbage_length_is_rejected() {
        let body = FILE_STAT.replace(">10<", ">ten<");
        assert!(matches!(
            parse_attr(&body),
            Err(Error::InvalidProperty { property: "getcontentlength", .. })
        ));
    }

    #[test]
    fn missing_response_is_rejected() {
        let body = r#"<D:multistatus xmlns:D="DAV:"></D:multistatus>"#;
        assert!(matches!(
            parse_attr(body),
            Err(Error::MissingElement { element: "response" })
        ));
    }
}
