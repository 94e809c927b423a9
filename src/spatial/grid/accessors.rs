mod cells;
mod processed;
