mod dispatch;
mod flatten;
mod merge_patch;
mod regenerate;
