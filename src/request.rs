use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;
use crate::model::{HeaderInfo, LayoutKind, LogoImage, ReportModel};

/// Input contract handed over by the form wizard.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub header: RequestHeader,
    #[serde(default)]
    pub sections: Vec<RequestSection>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub report_title: String,
    #[serde(default)]
    pub report_date: String,
    /// Logo file referenced from a JSON request. Relative paths resolve
    /// against the request file's directory.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
    /// Logo bytes supplied in-process; never part of the JSON form.
    #[serde(skip)]
    pub logo_image: Option<Vec<u8>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSection {
    pub title: String,
    #[serde(default, alias = "content")]
    pub body: String,
    /// Kept as text so an unknown kind surfaces as an input error rather
    /// than a JSON error.
    #[serde(alias = "layout")]
    pub layout_kind: String,
}

impl RenderRequest {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON request and loads the logo it references, if any.
    /// An unreadable logo file is dropped with a warning, like an
    /// undecodable one.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        let mut request = Self::from_json(&json)?;
        if request.header.logo_image.is_none()
            && let Some(logo) = request.header.logo_path.clone()
        {
            let logo = if logo.is_relative() {
                path.parent().unwrap_or(Path::new("")).join(logo)
            } else {
                logo
            };
            match std::fs::read(&logo) {
                Ok(bytes) => request.header.logo_image = Some(bytes),
                Err(e) => log::warn!("Logo {} unreadable, continuing without it: {e}", logo.display()),
            }
        }
        Ok(request)
    }

    /// Builds the section model, assigning section ids in request order.
    /// Fails on the first unrecognised layout kind.
    pub fn into_model(self) -> Result<ReportModel, Error> {
        let RequestHeader {
            company_name,
            report_title,
            report_date,
            logo_image,
            ..
        } = self.header;
        let mut model = ReportModel::new(HeaderInfo {
            report_title,
            company_name,
            report_date,
            logo: logo_image.map(|data| LogoImage { data }),
        });
        for (i, section) in self.sections.into_iter().enumerate() {
            let layout: LayoutKind = section.layout_kind.parse().map_err(|e| match e {
                Error::InvalidInput(msg) => {
                    Error::InvalidInput(format!("section {} ({:?}): {msg}", i + 1, section.title))
                }
                other => other,
            })?;
            model.push_section(section.title, section.body, layout);
        }
        Ok(model)
    }
}
