use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    pub openai: OpenAiConfig,
    pub sheets: SheetsConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Configuration for the OpenAI completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Sampling temperature; the ad-copy chains run hot for variety
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Google Sheets export configuration
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Path to the service-account JSON key file
    pub credentials_path: String,
    /// Account the created spreadsheet is shared with
    pub share_email: String,
    /// Role granted to the share recipient
    pub share_role: String,
    /// Default title for created spreadsheets
    pub default_sheet_title: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            openai: OpenAiConfig::from_env()?,
            sheets: SheetsConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Ad Copy Generator API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the ad copy generator".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl OpenAiConfig {
    const DEFAULT_TEMPERATURE: f64 = 0.9;
    const DEFAULT_MAX_TOKENS: u32 = 512;

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable is required".to_string())?;

        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com".to_string())
            .trim_end_matches('/')
            .to_string();

        let model =
            env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo-instruct".to_string());

        let temperature = env::var("OPENAI_TEMPERATURE")
            .unwrap_or_else(|_| Self::DEFAULT_TEMPERATURE.to_string())
            .parse::<f64>()
            .map_err(|_| "OPENAI_TEMPERATURE must be a valid number".to_string())?;

        let max_tokens = env::var("OPENAI_MAX_TOKENS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_TOKENS.to_string())
            .parse::<u32>()
            .map_err(|_| "OPENAI_MAX_TOKENS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
            max_tokens,
        })
    }
}

impl SheetsConfig {
    pub fn from_env() -> Result<Self, String> {
        let credentials_path = env::var("SHEETS_CREDENTIALS_PATH")
            .unwrap_or_else(|_| "generative-ai-418805-b73a3e84380a.json".to_string());

        let share_email =
            env::var("SHEETS_SHARE_EMAIL").unwrap_or_else(|_| "aman@warroominc.com".to_string());

        let share_role = env::var("SHEETS_SHARE_ROLE").unwrap_or_else(|_| "writer".to_string());

        let default_sheet_title = env::var("SHEETS_DEFAULT_TITLE")
            .unwrap_or_else(|_| "Generated_Ad_Copies".to_string());

        Ok(Self {
            credentials_path,
            share_email,
            share_role,
            default_sheet_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheets_config_defaults() {
        let config = SheetsConfig::from_env().unwrap();
        assert_eq!(config.share_role, "writer");
        assert_eq!(config.default_sheet_title, "Generated_Ad_Copies");
    }

    #[test]
    fn test_app_config_server_address() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec!["*".to_string()],
        };
        assert_eq!(config.server_address(), "0.0.0.0:8080");
    }
}
