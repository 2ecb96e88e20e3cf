mod fat_tree;
