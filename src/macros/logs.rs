macro_rules! debug_path {
    ($description: expr, $path: ident) => {
        tracing::debug!(
            "{COMPONENT} - {} exists at {:?}: {}",
            $description,
            $path,
            $path.exists()
        );
    };
}
pub(crate) use debug_path;

macro_rules! warn_no_games {
    ($path: expr) => {
        tracing::warn!("{COMPONENT} - No games found in {:?}", $path);
    };
}
pub(crate) use warn_no_games;
