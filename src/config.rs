/// 程序配置
///
/// 所有"隐式常量"（请求头、颜色、边框大小、网格形状）都集中在这里，
/// 通过构造时传入各组件，不使用模块级可变状态。
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的提示词数量
    pub max_concurrent_prompts: usize,
    /// 提示词来源模式
    pub prompt_mode: PromptMode,
    /// 静态模式下的固定提示词
    pub static_prompt: String,
    // --- 生成服务 API 配置 ---
    /// 生成接口地址
    pub generate_endpoint: String,
    /// origin 请求头（服务端访问策略要求的浏览器伪装头之一）
    pub origin: String,
    /// user-agent 请求头
    pub user_agent: String,
    /// 单次请求超时（秒），超时视为该提示词失败
    pub request_timeout_secs: u64,
    // --- 任务历史 API 配置（derived 模式） ---
    /// 任务历史服务地址
    pub job_api_base_url: String,
    /// 拉取最近任务名称的数量
    pub job_name_limit: usize,
    /// 任务名称过滤模式（空字符串表示不过滤）
    pub job_name_filter: String,
    // --- 输出配置 ---
    /// 成品图片输出目录
    pub output_dir: String,
    /// 运行日志文件
    pub output_log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 拼图与标注配置 ---
    /// 网格行数
    pub grid_rows: u32,
    /// 网格列数
    pub grid_cols: u32,
    /// 边框宽度（像素）
    pub border_size: u32,
    /// 边框背景色
    pub background_color: [u8; 3],
    /// 文字前景色
    pub text_color: [u8; 3],
    /// 提示词文字大小（上边框）
    pub prompt_font_size: f32,
    /// 署名文字大小（下边框，较小）
    pub attribution_font_size: f32,
    /// 署名文字内容
    pub attribution: String,
    /// 字体文件路径
    pub font_path: String,
}

/// 提示词来源模式
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptMode {
    /// 固定的单个提示词
    Static,
    /// 从任务历史中派生提示词列表
    Derived,
}

impl PromptMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "static" => Some(PromptMode::Static),
            "derived" => Some(PromptMode::Derived),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_prompts: 4,
            prompt_mode: PromptMode::Static,
            static_prompt: "chocolate toad".to_string(),
            generate_endpoint: "https://backend.craiyon.com/generate".to_string(),
            origin: "https://www.craiyon.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/103.0.0.0 Safari/537.36"
                .to_string(),
            request_timeout_secs: 180,
            job_api_base_url: "http://127.0.0.1:4200/api".to_string(),
            job_name_limit: 10,
            job_name_filter: String::new(),
            output_dir: "output_images".to_string(),
            output_log_file: "output.txt".to_string(),
            verbose_logging: false,
            grid_rows: 3,
            grid_cols: 3,
            border_size: 45,
            background_color: [255, 255, 255],
            text_color: [0, 0, 0],
            prompt_font_size: 28.0,
            attribution_font_size: 18.0,
            attribution: "craiyon.com".to_string(),
            font_path: "assets/DejaVuSans.ttf".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_prompts: std::env::var("MAX_CONCURRENT_PROMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_prompts),
            prompt_mode: std::env::var("PROMPT_MODE").ok().and_then(|v| PromptMode::parse(&v)).unwrap_or(default.prompt_mode),
            static_prompt: std::env::var("STATIC_PROMPT").unwrap_or(default.static_prompt),
            generate_endpoint: std::env::var("GENERATE_ENDPOINT").unwrap_or(default.generate_endpoint),
            origin: std::env::var("GENERATE_ORIGIN").unwrap_or(default.origin),
            user_agent: std::env::var("GENERATE_USER_AGENT").unwrap_or(default.user_agent),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            job_api_base_url: std::env::var("JOB_API_BASE_URL").unwrap_or(default.job_api_base_url),
            job_name_limit: std::env::var("JOB_NAME_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.job_name_limit),
            job_name_filter: std::env::var("JOB_NAME_FILTER").unwrap_or(default.job_name_filter),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            grid_rows: std::env::var("GRID_ROWS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.grid_rows),
            grid_cols: std::env::var("GRID_COLS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.grid_cols),
            border_size: std::env::var("BORDER_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.border_size),
            background_color: default.background_color,
            text_color: default.text_color,
            prompt_font_size: std::env::var("PROMPT_FONT_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.prompt_font_size),
            attribution_font_size: std::env::var("ATTRIBUTION_FONT_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.attribution_font_size),
            attribution: std::env::var("ATTRIBUTION").unwrap_or(default.attribution),
            font_path: std::env::var("FONT_PATH").unwrap_or(default.font_path),
        }
    }

    /// 一次批次中每个提示词期望的图片数量
    pub fn expected_image_count(&self) -> usize {
        (self.grid_rows * self.grid_cols) as usize
    }
}
